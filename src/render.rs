//! Canvas drawing for both modes, the HUD and the reward screens.
//!
//! Everything here only reads state. Draw calls that can fail are discarded
//! with `.ok()`; an image that is not loaded yet is simply skipped.

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::assets::{Assets, loaded_size};
use crate::closeup::Session;
use crate::config::{AffectionZones, GameConfig};
use crate::fish::Fish;
use crate::geometry::{Rect, Size, aspect_fit};
use crate::overlay::{Overlay, popup_layout, screen_rect};
use crate::state::{GameState, Mode};

const SHADOW_DROP: f64 = 10.0;
const GREEN: &str = "#4CAF50";

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    assets: &Assets,
    state: &GameState,
    config: &GameConfig,
    surface: Size,
) {
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);
    match &state.mode {
        Mode::Pond => draw_pond(ctx, assets, state, config, surface),
        Mode::Closeup(session) => draw_closeup(ctx, assets, state, session, config, surface),
    }
    draw_overlay(ctx, assets, state.overlay, surface);
}

fn blit(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, r: Rect) {
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, r.x, r.y, r.width, r.height)
        .ok();
}

fn outlined_text(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64) {
    ctx.stroke_text(text, x, y).ok();
    ctx.fill_text(text, x, y).ok();
}

fn text_style(ctx: &CanvasRenderingContext2d, font: &str) {
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str("#000");
    ctx.set_line_width(3.0);
    ctx.set_font(font);
}

// --- Pond -----------------------------------------------------------------------

fn draw_pond(
    ctx: &CanvasRenderingContext2d,
    assets: &Assets,
    state: &GameState,
    config: &GameConfig,
    surface: Size,
) {
    blit(ctx, &assets.pond_bg, Rect::new(0.0, 0.0, surface.width, surface.height));
    draw_water_ripples(ctx, surface, config.top_offset, state.water_time);

    for fish in state.pond.fishes() {
        let Some(img) = assets.fish_sprite(fish.kind.sprite) else {
            continue;
        };
        draw_fish_shadow(ctx, img, fish);
        if config.show_fish_sprites {
            draw_fish(ctx, img, fish);
        }
    }

    draw_water_highlights(ctx, surface, config.top_offset);

    text_style(ctx, "bold 32px Arial");
    ctx.set_text_align("left");
    let score = format!("Fish: {}", state.fish_value);
    outlined_text(ctx, &score, 20.0, config.top_offset + 30.0);
}

/// Translate to the fish, face along its heading, and draw the sprite centred.
fn fish_sprite_at(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, fish: &Fish, dy: f64) {
    ctx.translate(fish.pos.x, fish.pos.y + dy).ok();
    ctx.rotate(fish.heading + PI).ok();
    blit(
        ctx,
        img,
        Rect::new(-fish.width / 2.0, -fish.height / 2.0, fish.width, fish.height),
    );
}

fn draw_fish_shadow(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, fish: &Fish) {
    ctx.save();
    ctx.set_global_alpha(0.2);
    ctx.set_filter("brightness(0%)");
    fish_sprite_at(ctx, img, fish, SHADOW_DROP);
    ctx.set_filter("none");
    ctx.restore();
}

fn draw_fish(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, fish: &Fish) {
    ctx.save();
    fish_sprite_at(ctx, img, fish, 0.0);
    ctx.restore();
}

/// Layered sine bands below the pond's centre line, phase driven by `time`.
fn draw_water_ripples(ctx: &CanvasRenderingContext2d, surface: Size, top_offset: f64, time: f64) {
    const AMPLITUDE: f64 = 3.0;
    const FREQUENCY: f64 = 30.0;
    const BANDS: u32 = 3;
    let center_y = surface.height / 2.0 + top_offset / 2.0;

    ctx.save();
    ctx.set_global_alpha(0.1);
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
    for band in 0..BANDS {
        ctx.begin_path();
        ctx.move_to(0.0, center_y);
        let mut x = 0.0;
        while x < surface.width {
            let y = center_y
                + (x / FREQUENCY + time + band as f64).sin() * AMPLITUDE
                + (x / (FREQUENCY * 2.0) + time * 1.5).sin() * AMPLITUDE * 0.5;
            ctx.line_to(x, y);
            x += 10.0;
        }
        ctx.line_to(surface.width, surface.height);
        ctx.line_to(0.0, surface.height);
        ctx.close_path();
        ctx.fill();
    }
    ctx.restore();
}

fn draw_water_highlights(ctx: &CanvasRenderingContext2d, surface: Size, top_offset: f64) {
    let center_y = surface.height / 2.0 + top_offset / 2.0;
    ctx.save();
    ctx.set_global_alpha(0.1);
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.5)");
    ctx.set_line_width(2.0);
    for i in 0..3 {
        let y = center_y - 50.0 + i as f64 * 30.0;
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(surface.width, y);
        ctx.stroke();
    }
    ctx.restore();
}

// --- Close-up -------------------------------------------------------------------

fn draw_closeup(
    ctx: &CanvasRenderingContext2d,
    assets: &Assets,
    state: &GameState,
    session: &Session,
    config: &GameConfig,
    surface: Size,
) {
    blit(ctx, &assets.closeup_bg, Rect::new(0.0, 0.0, surface.width, surface.height));

    let sprite = state
        .pond
        .fish(session.fish)
        .and_then(|f| assets.closeup_sprite(f.kind.closeup));
    if let Some(img) = sprite {
        if let Some(size) = loaded_size(img) {
            blit(ctx, img, aspect_fit(size, surface));
        }
    }

    text_style(ctx, "bold 20px Arial");
    ctx.set_text_align("center");
    outlined_text(ctx, "Pet the fish", surface.width / 2.0, config.top_offset + 30.0);
    outlined_text(
        ctx,
        "Keep the marker in the green zone to win",
        surface.width / 2.0,
        config.top_offset + 60.0,
    );

    ctx.set_font("bold 24px Arial");
    ctx.set_text_align("right");
    let time = format!("{}s", session.seconds_left());
    outlined_text(ctx, &time, surface.width - 20.0, config.top_offset + 100.0);
    ctx.set_text_align("left");

    draw_affection_gauge(ctx, session.affection, &config.affection_zones, surface);
}

/// Vertical gauge on the left edge: dark at the bottom, green through the
/// middle, red at the top, with a white tick at the current affection.
fn draw_affection_gauge(
    ctx: &CanvasRenderingContext2d,
    affection: f64,
    zones: &AffectionZones,
    surface: Size,
) {
    let bar = Rect::new(20.0, surface.height * 0.3, 12.0, surface.height * 0.4);

    ctx.set_fill_style_str("#333");
    ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

    let gradient = ctx.create_linear_gradient(bar.x, bar.y + bar.height, bar.x, bar.y);
    gradient.add_color_stop(0.0, "#333333").ok();
    gradient
        .add_color_stop((zones.black.max / 100.0) as f32, GREEN)
        .ok();
    gradient
        .add_color_stop((zones.red.min / 100.0) as f32, GREEN)
        .ok();
    gradient.add_color_stop(1.0, "#F44336").ok();
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

    let indicator_y = bar.y + bar.height - (affection / 100.0 * bar.height);
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(bar.x - 3.0, indicator_y - 2.0, bar.width + 6.0, 4.0);
}

// --- Reward screens -------------------------------------------------------------

fn dim(ctx: &CanvasRenderingContext2d, alpha: f64, surface: Size) {
    ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
    ctx.fill_rect(0.0, 0.0, surface.width, surface.height);
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, assets: &Assets, overlay: Overlay, surface: Size) {
    match overlay {
        Overlay::None => {}
        Overlay::SuccessPopup => {
            dim(ctx, 0.85, surface);
            let Some(size) = loaded_size(&assets.success_popup) else {
                return;
            };
            let layout = popup_layout(surface, size);
            ctx.set_shadow_color("rgba(255, 255, 255, 0.8)");
            ctx.set_shadow_blur(30.0);
            ctx.set_shadow_offset_x(0.0);
            ctx.set_shadow_offset_y(0.0);
            ctx.set_image_smoothing_enabled(true);
            blit(ctx, &assets.success_popup, layout.image);
            ctx.set_shadow_blur(0.0);
        }
        Overlay::SecondScreen => draw_screen(ctx, &assets.second_screen, surface),
        Overlay::ThirdScreen => draw_screen(ctx, &assets.third_screen, surface),
    }
}

fn draw_screen(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, surface: Size) {
    dim(ctx, 0.5, surface);
    if let Some(size) = loaded_size(img) {
        blit(ctx, img, screen_rect(surface, size, 0.9));
    }
}
