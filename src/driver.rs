//! Browser frame loop.
//!
//! One `requestAnimationFrame` callback runs for the lifetime of the page:
//! advance the game by the nominal step, draw, and schedule itself again. The
//! step is not corrected for real elapsed time, so a dropped frame slows the
//! game down rather than making it jump.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::game::Game;
use crate::input::attach_listeners;
use crate::render::draw_frame;
use crate::surface::surface_size;

/// Everything the frame loop and the input listeners share.
pub struct App {
    pub game: Game,
    pub assets: Assets,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
}

impl App {
    fn frame(&mut self) {
        let surface = surface_size(&self.canvas);
        let step = self.game.config.frame_step_ms;
        self.game.tick(step, surface, &self.assets);
        draw_frame(
            &self.ctx,
            &self.assets,
            &self.game.state,
            &self.game.config,
            surface,
        );
    }
}

/// Create the pond for the current canvas, hook up input and start the loop.
pub fn run(canvas: HtmlCanvasElement, assets: Assets, config: GameConfig) -> Result<(), JsValue> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let game = Game::from_entropy(config, surface_size(&canvas));
    log::info!("pond ready with {} fish", game.state.pond.len());

    let app = Rc::new(RefCell::new(App {
        game,
        assets,
        canvas: canvas.clone(),
        ctx,
    }));
    attach_listeners(&canvas, app.clone())?;
    start_loop(app);
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn start_loop(app: Rc<RefCell<App>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        app.borrow_mut().frame();
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
