//! Touch handling.
//!
//! A touch start is routed by precedence: the reward screens first (third,
//! then second, then the popup), then the current mode. Touch end only matters
//! during a close-up. The browser side maps touch (and, for desktop play,
//! mouse) events to surface-local points and forwards them here.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

use crate::driver::App;
use crate::game::Game;
use crate::geometry::{ImageMetrics, Point, Size};
use crate::overlay::Overlay;
use crate::state::Mode;
use crate::surface::{surface_size, to_surface};

/// What a touch start did; used for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchOutcome {
    Ignored,
    AdvancedToThirdScreen,
    PopupDismissed,
    Absorbed,
    EnteredCloseup(usize),
    Missed,
    HoldStarted,
}

impl<R: Rng> Game<R> {
    pub fn touch_start<M: ImageMetrics + ?Sized>(
        &mut self,
        p: Point,
        surface: Size,
        metrics: &M,
    ) -> TouchOutcome {
        match self.state.overlay {
            Overlay::ThirdScreen => return TouchOutcome::Ignored,
            Overlay::SecondScreen => {
                self.state.overlay = Overlay::ThirdScreen;
                log::debug!("overlay -> third screen");
                return TouchOutcome::AdvancedToThirdScreen;
            }
            Overlay::SuccessPopup => {
                if self.state.popup_button.is_some_and(|b| b.contains(p)) {
                    self.state.overlay = Overlay::SecondScreen;
                    log::debug!("overlay -> second screen");
                    return TouchOutcome::PopupDismissed;
                }
                return TouchOutcome::Absorbed;
            }
            Overlay::None => {}
        }

        match self.state.mode {
            Mode::Pond => match self.state.pond.hit_test(p) {
                Some(fish) => {
                    self.enter_closeup(fish, surface, metrics);
                    TouchOutcome::EnteredCloseup(fish)
                }
                None => TouchOutcome::Missed,
            },
            Mode::Closeup(_) => {
                self.state.is_holding = true;
                TouchOutcome::HoldStarted
            }
        }
    }

    pub fn touch_end(&mut self) {
        if !self.state.mode.is_pond() {
            self.state.is_holding = false;
        }
    }
}

// --- Browser wiring -------------------------------------------------------------

fn press(app: &Rc<RefCell<App>>, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) {
    let p = to_surface(canvas, client_x, client_y);
    let size = surface_size(canvas);
    let mut app = app.borrow_mut();
    let App { game, assets, .. } = &mut *app;
    let outcome = game.touch_start(p, size, &*assets);
    log::trace!("touch at ({:.0}, {:.0}): {outcome:?}", p.x, p.y);
}

fn release(app: &Rc<RefCell<App>>) {
    app.borrow_mut().game.touch_end();
}

pub(crate) fn attach_listeners(
    canvas: &HtmlCanvasElement,
    app: Rc<RefCell<App>>,
) -> Result<(), JsValue> {
    {
        let app = app.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some(touch) = evt.touches().get(0) {
                press(&app, &target, touch.client_x() as f64, touch.client_y() as f64);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |_evt: TouchEvent| {
            release(&app);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Keep the page from scrolling under the finger.
    {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Mouse mirrors touch for desktop play.
    {
        let app = app.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            press(&app, &target, evt.client_x() as f64, evt.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            release(&app);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
