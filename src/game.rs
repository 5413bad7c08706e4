//! Deterministic frame function.
//!
//! [`Game`] owns the state, the rules and the random source. The browser loop
//! calls [`Game::tick`] once per animation frame with the nominal step; tests
//! call it in a plain loop with a seeded RNG. Nothing here touches the DOM.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::closeup::{Outcome, Progress, Session};
use crate::config::GameConfig;
use crate::geometry::{ImageMetrics, Size};
use crate::overlay::{Overlay, popup_layout, second_screen_layout};
use crate::pond::Pond;
use crate::state::{GameState, Mode};

pub struct Game<R = SmallRng> {
    pub state: GameState,
    pub config: GameConfig,
    pub(crate) rng: R,
}

impl Game<SmallRng> {
    /// Game seeded from the platform's entropy source.
    pub fn from_entropy(config: GameConfig, surface: Size) -> Self {
        Self::new(config, surface, SmallRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, surface: Size, mut rng: R) -> Self {
        let pond = Pond::new(&config, surface, &mut rng);
        Self {
            state: GameState::new(pond),
            config,
            rng,
        }
    }

    /// Replace every fish with a freshly spawned one sized to `surface`.
    pub fn reset_pond(&mut self, surface: Size) {
        self.state.pond = Pond::new(&self.config, surface, &mut self.rng);
    }

    /// Start a close-up session on the fish at `fish`. Any previous session
    /// values are discarded.
    pub fn enter_closeup<M: ImageMetrics + ?Sized>(
        &mut self,
        fish: usize,
        surface: Size,
        metrics: &M,
    ) {
        let Some(kind) = self.state.pond.fish(fish).map(|f| f.kind) else {
            return;
        };
        log::info!("close-up on fish #{fish} ({})", kind.name);
        let sprite = metrics.closeup_size(kind.closeup);
        let session = Session::start(fish, &self.config, sprite, surface, &mut self.rng);
        self.state.mode = Mode::Closeup(session);
    }

    /// Advance one frame of `step_ms`. Returns the outcome on the frame a
    /// close-up session resolves.
    pub fn tick<M: ImageMetrics + ?Sized>(
        &mut self,
        step_ms: f64,
        surface: Size,
        metrics: &M,
    ) -> Option<Outcome> {
        let mut resolved = None;
        match &mut self.state.mode {
            Mode::Pond => self.state.pond.update(step_ms, &mut self.rng),
            Mode::Closeup(session) => {
                if let Progress::Resolved(outcome) =
                    session.tick(self.state.is_holding, step_ms, &self.config)
                {
                    log::info!(
                        "close-up resolved: {outcome:?}, affection {:.1}, green {:?}",
                        session.affection,
                        self.config.affection_zones.green
                    );
                    resolved = Some(outcome);
                }
            }
        }
        if let Some(outcome) = resolved {
            self.finish_closeup(outcome);
        }
        self.state.water_time += self.config.water_time_step;
        self.refresh_overlay_layout(surface, metrics);
        resolved
    }

    fn finish_closeup(&mut self, outcome: Outcome) {
        if outcome == Outcome::Success {
            self.state.fish_value += 1;
            self.state.overlay = Overlay::SuccessPopup;
            log::debug!("overlay -> success popup");
        }
        self.state.mode = Mode::Pond;
        self.state.is_holding = false;
        #[cfg(feature = "serde_json")]
        log::debug!("state {}", self.state.snapshot().to_json());
    }

    fn refresh_overlay_layout<M: ImageMetrics + ?Sized>(&mut self, surface: Size, metrics: &M) {
        let overlay = self.state.overlay;
        self.state.popup_button = overlay
            .shows_success_popup()
            .then(|| metrics.popup_size())
            .flatten()
            .map(|image| popup_layout(surface, image).button);
        self.state.second_screen_button = overlay
            .shows_second_screen()
            .then(|| metrics.second_screen_size())
            .flatten()
            .map(|image| second_screen_layout(surface, image).button);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct Loaded;

    impl ImageMetrics for Loaded {
        fn closeup_size(&self, _closeup: &str) -> Option<Size> {
            Some(Size::new(600.0, 800.0))
        }
        fn popup_size(&self) -> Option<Size> {
            Some(Size::new(1000.0, 1000.0))
        }
        fn second_screen_size(&self) -> Option<Size> {
            Some(Size::new(900.0, 1200.0))
        }
    }

    pub(crate) const SURFACE: Size = Size::new(400.0, 700.0);

    pub(crate) fn game(seed: u64) -> Game {
        Game::new(GameConfig::default(), SURFACE, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn test_tick_advances_water_time() {
        let mut g = game(1);
        g.tick(16.0, SURFACE, &Loaded);
        g.tick(16.0, SURFACE, &Loaded);
        assert!((g.state.water_time - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_pond_tick_moves_fish() {
        let mut g = game(2);
        let before: Vec<_> = g.state.pond.fishes().iter().map(|f| f.pos).collect();
        for _ in 0..30 {
            g.tick(16.0, SURFACE, &Loaded);
        }
        let moved = g
            .state
            .pond
            .fishes()
            .iter()
            .zip(before)
            .any(|(f, p)| f.pos != p);
        assert!(moved);
    }

    #[test]
    fn test_fish_frozen_during_closeup() {
        let mut g = game(3);
        g.enter_closeup(0, SURFACE, &Loaded);
        let before: Vec<_> = g.state.pond.fishes().iter().map(|f| f.pos).collect();
        for _ in 0..30 {
            g.tick(16.0, SURFACE, &Loaded);
        }
        let after: Vec<_> = g.state.pond.fishes().iter().map(|f| f.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_enter_closeup_out_of_range_is_ignored() {
        let mut g = game(4);
        g.enter_closeup(99, SURFACE, &Loaded);
        assert!(g.state.mode.is_pond());
    }

    #[test]
    fn test_outcome_controls_popup_and_score() {
        let mut g = game(5);
        g.enter_closeup(1, SURFACE, &Loaded);
        let mut outcome = None;
        while outcome.is_none() {
            outcome = g.tick(16.0, SURFACE, &Loaded);
        }
        // Released the whole time: 50 - 50 = 0, outside the green zone.
        assert_eq!(outcome, Some(Outcome::Failure));
        assert_eq!(g.state.overlay, Overlay::None);
        assert!(g.state.popup_button.is_none());

        g.enter_closeup(1, SURFACE, &Loaded);
        if let Mode::Closeup(s) = &mut g.state.mode {
            s.timer_ms = 16.0;
        }
        assert_eq!(g.tick(16.0, SURFACE, &Loaded), Some(Outcome::Success));
        assert_eq!(g.state.fish_value, 1);
        assert_eq!(g.state.overlay, Overlay::SuccessPopup);
        assert!(g.state.popup_button.is_some());
        assert!(g.state.mode.is_pond());
    }
}
