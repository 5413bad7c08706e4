// Shared helpers for the native integration tests.
#![allow(dead_code)]

use fish_pond::{Game, GameConfig, ImageMetrics, Size};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub const SURFACE: Size = Size::new(414.0, 736.0);
pub const STEP: f64 = 16.0;

/// Every image reported as loaded with fixed natural sizes.
pub struct AllLoaded;

impl ImageMetrics for AllLoaded {
    fn closeup_size(&self, _closeup: &str) -> Option<Size> {
        Some(Size::new(750.0, 1000.0))
    }
    fn popup_size(&self) -> Option<Size> {
        Some(Size::new(700.0, 500.0))
    }
    fn second_screen_size(&self) -> Option<Size> {
        Some(Size::new(750.0, 1334.0))
    }
}

pub fn new_game(seed: u64) -> Game {
    Game::new(GameConfig::default(), SURFACE, SmallRng::seed_from_u64(seed))
}

/// Tap the first fish so the game enters close-up mode.
pub fn enter_closeup(game: &mut Game) -> usize {
    let spot = game.state.pond.fishes()[0].pos;
    match game.touch_start(spot, SURFACE, &AllLoaded) {
        fish_pond::TouchOutcome::EnteredCloseup(idx) => idx,
        other => panic!("expected to enter close-up, got {other:?}"),
    }
}
