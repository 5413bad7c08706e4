//! Reward screens shown after a won close-up.
//!
//! The screens form a one-way sequence: popup, then the second screen, then the
//! third (terminal) screen. Holding the step as a single enum keeps two screens
//! from ever being up at once.

use crate::geometry::{Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Overlay {
    #[default]
    None,
    SuccessPopup,
    SecondScreen,
    ThirdScreen,
}

impl Overlay {
    pub fn shows_success_popup(self) -> bool {
        self == Overlay::SuccessPopup
    }

    pub fn shows_second_screen(self) -> bool {
        self == Overlay::SecondScreen
    }

    pub fn shows_third_screen(self) -> bool {
        self == Overlay::ThirdScreen
    }
}

/// Where an overlay image is drawn and where its button sits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayLayout {
    pub image: Rect,
    pub button: Rect,
}

/// Image scaled to `width_frac` of the surface width, aspect kept, centred.
pub fn screen_rect(surface: Size, image: Size, width_frac: f64) -> Rect {
    let width = surface.width * width_frac;
    let height = width * (image.height / image.width);
    Rect::new(
        (surface.width - width) / 2.0,
        (surface.height - height) / 2.0,
        width,
        height,
    )
}

fn centred_button(image: Rect, width_frac: f64, height_frac: f64, top_frac: f64) -> Rect {
    let width = image.width * width_frac;
    Rect::new(
        image.x + (image.width - width) / 2.0,
        image.y + image.height * top_frac,
        width,
        image.height * height_frac,
    )
}

pub fn popup_layout(surface: Size, image: Size) -> OverlayLayout {
    let image = screen_rect(surface, image, 0.95);
    OverlayLayout {
        image,
        button: centred_button(image, 0.6, 0.2, 0.65),
    }
}

pub fn second_screen_layout(surface: Size, image: Size) -> OverlayLayout {
    let image = screen_rect(surface, image, 0.9);
    OverlayLayout {
        image,
        button: centred_button(image, 0.4, 0.15, 0.7),
    }
}
