//! Close-up mini-game.
//!
//! Tapping a fish opens a timed session. While the player holds, affection
//! climbs toward 100; while released it sinks toward 0. When the timer runs
//! out the session resolves once: ending inside the green zone is a win.
//!
//! A target zone and a mark are generated inside the close-up sprite when the
//! session starts. Neither feeds the outcome: [`Session::is_in_target_zone`]
//! and [`Session::mark_due`] report on them but the frame loop does not consult
//! either.

use rand::Rng;

use crate::config::GameConfig;
use crate::geometry::{Point, Size, aspect_fit};

/// Horizontal band inside the scaled close-up sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetZone {
    pub x: f64, // surface x of the band's left edge
    pub width: f64,
    pub image_x: f64, // surface x of the sprite's left edge
    pub scaled_width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    pub pos: Point,
    pub generated_at_ms: f64, // session-elapsed time
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Running,
    Resolved(Outcome),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub fish: usize, // index into the pond
    pub timer_ms: f64,
    pub affection: f64,
    pub scroll_position: f64,
    pub elapsed_ms: f64,
    pub zone: Option<TargetZone>,
    pub mark: Option<Mark>,
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Pick a band of `zone_width` at a random x within the sprite's scaled width.
pub fn generate_target_zone<R: Rng + ?Sized>(
    sprite: Size,
    surface: Size,
    zone_width: f64,
    rng: &mut R,
) -> TargetZone {
    let fit = aspect_fit(sprite, surface);
    TargetZone {
        x: fit.x + unit(rng) * (fit.width - zone_width),
        width: zone_width,
        image_x: fit.x,
        scaled_width: fit.width,
    }
}

/// Pick a point inside the scaled sprite, inset by half the mark size on each side.
pub fn generate_new_mark<R: Rng + ?Sized>(
    sprite: Size,
    surface: Size,
    mark_size: f64,
    now_ms: f64,
    rng: &mut R,
) -> Mark {
    let fit = aspect_fit(sprite, surface);
    let margin = mark_size / 2.0;
    Mark {
        pos: Point::new(
            fit.x + margin + unit(rng) * (fit.width - mark_size),
            fit.y + margin + unit(rng) * (fit.height - mark_size),
        ),
        generated_at_ms: now_ms,
    }
}

impl Session {
    /// Fresh session for the fish at `fish`. The zone and mark are only
    /// generated when the close-up sprite is loaded (`sprite` is `Some`).
    pub fn start<R: Rng + ?Sized>(
        fish: usize,
        config: &GameConfig,
        sprite: Option<Size>,
        surface: Size,
        rng: &mut R,
    ) -> Self {
        let zone = sprite.map(|s| generate_target_zone(s, surface, config.zone_width, rng));
        let mark = sprite.map(|s| generate_new_mark(s, surface, config.mark_size, 0.0, rng));
        Self {
            fish,
            timer_ms: config.closeup_duration_ms,
            affection: config.start_affection,
            scroll_position: 0.0,
            elapsed_ms: 0.0,
            zone,
            mark,
        }
    }

    /// One logical frame. Returns `Resolved` exactly once, on the frame the
    /// timer reaches zero.
    pub fn tick(&mut self, holding: bool, step_ms: f64, config: &GameConfig) -> Progress {
        let dt = step_ms / 1_000.0;
        self.affection = if holding {
            (self.affection + config.affection_rise_speed * dt).min(100.0)
        } else {
            (self.affection - config.affection_fall_speed * dt).max(0.0)
        };
        self.scroll_position += config.scroll_speed;
        self.elapsed_ms += step_ms;
        self.timer_ms = (self.timer_ms - step_ms).max(0.0);

        if self.timer_ms > 0.0 {
            return Progress::Running;
        }
        if config.affection_zones.green.contains(self.affection) {
            Progress::Resolved(Outcome::Success)
        } else {
            Progress::Resolved(Outcome::Failure)
        }
    }

    /// Whether the scroll accumulator, wrapped to the sprite width, sits inside
    /// the target band.
    pub fn is_in_target_zone(&self) -> bool {
        let Some(zone) = self.zone else {
            return false;
        };
        let block_x = self.scroll_position % zone.scaled_width;
        let left = zone.x - zone.image_x;
        block_x >= left && block_x <= left + zone.width
    }

    /// Whether `mark_interval_ms` has passed since the mark was generated.
    pub fn mark_due(&self, config: &GameConfig) -> bool {
        self.mark
            .is_some_and(|m| self.elapsed_ms - m.generated_at_ms >= config.mark_interval_ms)
    }

    /// Whole seconds left, rounded up, for the countdown readout.
    pub fn seconds_left(&self) -> f64 {
        (self.timer_ms / 1_000.0).ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SURFACE: Size = Size::new(400.0, 700.0);
    const SPRITE: Size = Size::new(800.0, 600.0);

    fn session(rng: &mut SmallRng) -> Session {
        Session::start(0, &GameConfig::default(), Some(SPRITE), SURFACE, rng)
    }

    #[test]
    fn test_start_resets_values() {
        let mut rng = SmallRng::seed_from_u64(1);
        let s = session(&mut rng);
        assert_eq!(s.timer_ms, 10_000.0);
        assert_eq!(s.affection, 50.0);
        assert_eq!(s.scroll_position, 0.0);
        assert!(s.zone.is_some());
        assert!(s.mark.is_some());
    }

    #[test]
    fn test_start_without_sprite_skips_geometry() {
        let mut rng = SmallRng::seed_from_u64(1);
        let s = Session::start(2, &GameConfig::default(), None, SURFACE, &mut rng);
        assert!(s.zone.is_none());
        assert!(s.mark.is_none());
        assert!(!s.is_in_target_zone());
        assert!(!s.mark_due(&GameConfig::default()));
    }

    #[test]
    fn test_zone_within_scaled_sprite() {
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..200 {
            let z = generate_target_zone(SPRITE, SURFACE, 40.0, &mut rng);
            assert!(z.x >= z.image_x);
            assert!(z.x + z.width <= z.image_x + z.scaled_width + 1e-9);
            assert!((z.scaled_width - 400.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mark_inset_by_half_size() {
        let mut rng = SmallRng::seed_from_u64(8);
        let fit = aspect_fit(SPRITE, SURFACE);
        for _ in 0..200 {
            let m = generate_new_mark(SPRITE, SURFACE, 80.0, 0.0, &mut rng);
            assert!(m.pos.x - 40.0 >= fit.x - 1e-9);
            assert!(m.pos.x + 40.0 <= fit.x + fit.width + 1e-9);
            assert!(m.pos.y - 40.0 >= fit.y - 1e-9);
            assert!(m.pos.y + 40.0 <= fit.y + fit.height + 1e-9);
        }
    }

    #[test]
    fn test_affection_clamped() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        s.affection = 99.95;
        s.tick(true, 16.0, &cfg);
        assert_eq!(s.affection, 100.0);
        s.affection = 0.02;
        s.tick(false, 16.0, &cfg);
        assert_eq!(s.affection, 0.0);
    }

    #[test]
    fn test_resolves_on_625th_frame() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        for _ in 0..624 {
            assert_eq!(s.tick(false, 16.0, &cfg), Progress::Running);
        }
        assert!(matches!(s.tick(false, 16.0, &cfg), Progress::Resolved(_)));
        assert_eq!(s.timer_ms, 0.0);
    }

    #[test]
    fn test_scroll_advances_each_frame() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        for _ in 0..10 {
            s.tick(true, 16.0, &cfg);
        }
        assert!((s.scroll_position - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_in_target_zone_wraps() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        s.zone = Some(TargetZone {
            x: 100.0,
            width: 40.0,
            image_x: 0.0,
            scaled_width: 400.0,
        });
        s.scroll_position = 120.0;
        assert!(s.is_in_target_zone());
        s.scroll_position = 520.0;
        assert!(s.is_in_target_zone());
        s.scroll_position = 150.0;
        assert!(!s.is_in_target_zone());
    }

    #[test]
    fn test_mark_due_after_interval() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        for _ in 0..124 {
            s.tick(true, 16.0, &cfg);
        }
        assert!(!s.mark_due(&cfg));
        s.tick(true, 16.0, &cfg);
        assert!(s.mark_due(&cfg));
    }

    #[test]
    fn test_seconds_left_rounds_up() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = session(&mut rng);
        s.timer_ms = 9_001.0;
        assert_eq!(s.seconds_left(), 10.0);
        s.timer_ms = 9_000.0;
        assert_eq!(s.seconds_left(), 9.0);
    }
}
