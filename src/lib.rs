//! Fish Pond core crate.
//!
//! A pond of fish swims on a canvas. Tapping a fish opens a ten-second
//! close-up where the player holds to raise affection and releases to let it
//! fall; finishing inside the green zone scores a point and shows the reward
//! screens. The simulation (`fish`, `pond`, `closeup`, `game`, `input`) has no
//! browser dependencies and is tested natively; `assets`, `surface`, `render`
//! and `driver` are the web-sys side.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, window};

pub mod closeup;
pub mod config;
pub mod fish;
pub mod game;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod pond;
pub mod state;

mod assets;
mod driver;
mod render;
mod surface;

pub use closeup::{Outcome, Progress, Session};
pub use config::{FISH_TYPES, FishType, GameConfig};
pub use game::Game;
pub use geometry::{ImageMetrics, Point, Rect, Size};
pub use input::TouchOutcome;
pub use overlay::Overlay;
pub use state::{GameState, Mode};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

const CANVAS_ID: &str = "gameCanvas";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Size the canvas, load every image, then start the pond. On a load failure
/// an error panel with a reload button is shown and the loop never starts.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
        .dyn_into()?;

    let config = GameConfig::default();
    surface::keep_fitted(&win, &canvas, config.surface)?;

    wasm_bindgen_futures::spawn_local(async move {
        match assets::load_all(&assets::AssetManifest::default()).await {
            Ok(loaded) => {
                if let Err(e) = driver::run(canvas, loaded, config) {
                    log::error!("failed to start game: {e:?}");
                }
            }
            Err(e) => {
                log::error!("{e}");
                if let Err(e) = assets::show_load_error(&doc) {
                    log::error!("failed to show error panel: {e:?}");
                }
            }
        }
    });
    Ok(())
}
