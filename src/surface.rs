//! Canvas sizing and page-to-canvas coordinate mapping.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use crate::config::SurfaceLimits;
use crate::geometry::{Point, Size};

/// Viewport size capped at the portrait limits.
pub fn fitted_size(viewport: Size, limits: SurfaceLimits) -> Size {
    Size::new(
        viewport.width.min(limits.max_width),
        viewport.height.min(limits.max_height),
    )
}

pub fn surface_size(canvas: &HtmlCanvasElement) -> Size {
    Size::new(canvas.width() as f64, canvas.height() as f64)
}

/// Translate client coordinates into canvas-local ones.
pub fn to_surface(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(client_x - rect.left(), client_y - rect.top())
}

fn viewport(win: &Window) -> Size {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(w, h)
}

pub fn fit_canvas(win: &Window, canvas: &HtmlCanvasElement, limits: SurfaceLimits) {
    let size = fitted_size(viewport(win), limits);
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
}

/// Fit now and again on every window resize.
pub fn keep_fitted(
    win: &Window,
    canvas: &HtmlCanvasElement,
    limits: SurfaceLimits,
) -> Result<(), JsValue> {
    fit_canvas(win, canvas, limits);
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        if let Some(w) = web_sys::window() {
            fit_canvas(&w, &target, limits);
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
