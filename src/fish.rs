//! Per-fish kinematics.
//!
//! A fish wanders by easing its heading and speed toward randomly re-chosen
//! targets. It lives inside a circular home region: when the next step would
//! leave `radius * 0.85`, the fish stays put for that tick and turns back
//! toward the centre instead of being clamped onto the edge.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use rand::Rng;

use crate::config::FishType;
use crate::geometry::{Point, Size};

/// Fraction of the home radius a fish may swim to before it turns back.
pub const BOUNDARY_FACTOR: f64 = 0.85;
/// Fraction of the home radius used for spawn positions.
const SPAWN_FACTOR: f64 = 0.8;
const EASING: f64 = 0.1;
const BOB_AMPLITUDE: f64 = 0.5;

/// Circular area a fish is confined to, fixed at creation from the surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomeRegion {
    pub center: Point,
    pub radius: f64,
}

impl HomeRegion {
    pub fn for_surface(surface: Size, top_offset: f64) -> Self {
        Self {
            center: Point::new(surface.width / 2.0, surface.height / 2.0 + top_offset / 2.0),
            radius: surface.width.min(surface.height) * 0.6,
        }
    }

    pub fn limit(&self) -> f64 {
        self.radius * BOUNDARY_FACTOR
    }
}

#[derive(Clone, Debug)]
pub struct Fish {
    pub kind: &'static FishType,
    pub pos: Point,
    pub width: f64,
    pub height: f64,
    pub heading: f64,        // radians
    pub target_heading: f64, // radians
    pub speed: f64,
    pub target_speed: f64,
    pub float_phase: f64,
    pub float_speed: f64,
    pub direction_timer_ms: f64,
    pub speed_timer_ms: f64,
    pub home: HomeRegion,
}

impl Fish {
    /// Place a new fish at a random point inside its home region.
    pub fn spawn<R: Rng + ?Sized>(kind: &'static FishType, home: HomeRegion, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let dist = rng.gen_range(0.0..1.0) * home.radius * SPAWN_FACTOR;
        let heading = rng.gen_range(0.0..TAU);
        Self {
            kind,
            pos: Point::new(
                home.center.x + angle.cos() * dist,
                home.center.y + angle.sin() * dist,
            ),
            width: kind.size,
            height: kind.size * 0.6,
            heading,
            target_heading: heading,
            speed: kind.speed,
            target_speed: kind.speed,
            float_phase: rng.gen_range(0.0..TAU),
            float_speed: rng.gen_range(0.02..0.04),
            direction_timer_ms: 0.0,
            speed_timer_ms: 0.0,
            home,
        }
    }

    pub fn distance_from_home(&self) -> f64 {
        self.pos.distance(self.home.center)
    }

    /// Advance one logical frame of `step_ms`.
    pub fn update<R: Rng + ?Sized>(&mut self, step_ms: f64, rng: &mut R) {
        self.float_phase += self.float_speed;
        let bob = self.float_phase.sin() * BOB_AMPLITUDE;

        if self.direction_timer_ms <= 0.0 {
            self.target_heading = self.heading + rng.gen_range(-FRAC_PI_2..FRAC_PI_2);
            self.direction_timer_ms = rng.gen_range(1_000.0..3_000.0);
        }
        self.heading += (self.target_heading - self.heading) * EASING;

        if self.speed_timer_ms <= 0.0 {
            self.target_speed = self.kind.speed * rng.gen_range(0.5..1.5);
            self.speed_timer_ms = rng.gen_range(2_000.0..5_000.0);
        }
        self.speed += (self.target_speed - self.speed) * EASING;

        let next = Point::new(
            self.pos.x + self.heading.cos() * self.speed,
            self.pos.y + self.heading.sin() * self.speed + bob,
        );

        if next.distance(self.home.center) > self.home.limit() {
            // Turn in place this tick; the angle from the centre plus PI points back inward.
            let outward = (self.pos.y - self.home.center.y).atan2(self.pos.x - self.home.center.x);
            self.heading = outward + PI + rng.gen_range(-FRAC_PI_4..FRAC_PI_4);
            self.target_heading = self.heading;
        } else {
            self.pos = next;
        }

        self.direction_timer_ms -= step_ms;
        self.speed_timer_ms -= step_ms;
    }
}
