//! Whole-session game state.

use crate::closeup::Session;
use crate::geometry::Rect;
use crate::overlay::Overlay;
use crate::pond::Pond;

/// The active interaction mode. The close-up session, and with it the index
/// of the fish under close-up, only exists while in `Closeup`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
    #[default]
    Pond,
    Closeup(Session),
}

impl Mode {
    pub fn is_pond(&self) -> bool {
        matches!(self, Mode::Pond)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Mode::Closeup(s) => Some(s),
            Mode::Pond => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub mode: Mode,
    pub fish_value: u32,
    pub pond: Pond,
    pub is_holding: bool,
    pub overlay: Overlay,
    pub water_time: f64,
    // Recomputed every frame from the current layout; `None` until the image is loaded.
    pub popup_button: Option<Rect>,
    pub second_screen_button: Option<Rect>,
}

impl GameState {
    pub fn new(pond: Pond) -> Self {
        Self {
            pond,
            ..Self::default()
        }
    }

    /// Index of the fish under close-up, if any.
    pub fn current_fish(&self) -> Option<usize> {
        self.mode.session().map(|s| s.fish)
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.mode.session();
        Snapshot {
            mode: if self.mode.is_pond() { "pond" } else { "closeup" },
            fish_value: self.fish_value,
            fish_count: self.pond.len(),
            current_fish: self.current_fish(),
            closeup_timer_ms: session.map(|s| s.timer_ms),
            affection: session.map(|s| s.affection),
            is_holding: self.is_holding,
            overlay: self.overlay,
        }
    }
}

/// Flat summary of the state for debug logging.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub mode: &'static str,
    pub fish_value: u32,
    pub fish_count: usize,
    pub current_fish: Option<usize>,
    pub closeup_timer_ms: Option<f64>,
    pub affection: Option<f64>,
    pub is_holding: bool,
    pub overlay: Overlay,
}

#[cfg(feature = "serde_json")]
impl Snapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
