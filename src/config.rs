//! Game tuning constants.
//!
//! Every number the pond and the close-up mini-game depend on lives in
//! [`GameConfig`]. The defaults are the shipped rules; nothing reads them from
//! the page at runtime. Tests build their own configs to drive exact tick counts.

#[cfg(feature = "serde")]
use serde::Serialize;

// --- Fish types ---------------------------------------------------------------

/// Static description of one kind of fish.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FishType {
    pub name: &'static str,
    pub sprite: &'static str,  // pond sprite, relative to the image base path
    pub closeup: &'static str, // close-up sprite, same base path
    pub speed: f64,            // base speed in px per frame
    pub size: f64,             // drawn width in px; height is size * 0.6
}

pub static FISH_TYPES: [FishType; 3] = [
    FishType {
        name: "Goldfish",
        sprite: "fish1.png",
        closeup: "fish1_closeup.png",
        speed: 1.5,
        size: 60.0,
    },
    FishType {
        name: "Carp",
        sprite: "fish2.png",
        closeup: "fish2_closeup.png",
        speed: 2.0,
        size: 80.0,
    },
    FishType {
        name: "Tropical",
        sprite: "fish3.png",
        closeup: "fish3_closeup.png",
        speed: 2.5,
        size: 50.0,
    },
];

// --- Affection zones ------------------------------------------------------------

/// Closed interval on the affection scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ZoneRange {
    pub min: f64,
    pub max: f64,
}

impl ZoneRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bands of the affection gauge. Only `green` decides the outcome; `black` and
/// `red` shape the gauge gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AffectionZones {
    pub black: ZoneRange,
    pub green: ZoneRange,
    pub red: ZoneRange,
}

impl Default for AffectionZones {
    fn default() -> Self {
        Self {
            black: ZoneRange::new(0.0, 20.0),
            green: ZoneRange::new(30.0, 70.0),
            red: ZoneRange::new(80.0, 100.0),
        }
    }
}

// --- Surface --------------------------------------------------------------------

/// Largest portrait size the canvas is allowed to grow to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SurfaceLimits {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        Self {
            max_width: 414.0,
            max_height: 736.0,
        }
    }
}

// --- Game config ----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GameConfig {
    pub fish_count: usize,
    pub frame_step_ms: f64, // nominal logical step; not corrected for real frame time
    pub top_offset: f64,    // safe-area inset at the top of the surface
    pub closeup_duration_ms: f64,
    pub start_affection: f64,
    pub affection_rise_speed: f64, // affection per second while holding
    pub affection_fall_speed: f64, // affection per second while released
    pub affection_zones: AffectionZones,
    pub scroll_speed: f64, // px per frame
    pub zone_width: f64,
    pub mark_size: f64,
    pub mark_interval_ms: f64,
    pub water_time_step: f64, // ripple phase advance per frame
    pub show_fish_sprites: bool,
    pub surface: SurfaceLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fish_count: 8,
            frame_step_ms: 16.0,
            top_offset: 20.0,
            closeup_duration_ms: 10_000.0,
            start_affection: 50.0,
            affection_rise_speed: 10.0,
            affection_fall_speed: 5.0,
            affection_zones: AffectionZones::default(),
            scroll_speed: 1.5,
            zone_width: 40.0,
            mark_size: 80.0,
            mark_interval_ms: 2_000.0,
            water_time_step: 0.02,
            show_fish_sprites: false,
            surface: SurfaceLimits::default(),
        }
    }
}
