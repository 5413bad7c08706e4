//! Image loading.
//!
//! All images must be loaded before the pond is created and the frame loop
//! starts. The five scene images are requested together and get one attempt
//! each. Fish sprites are fetched one after another with a short retry
//! budget. If anything still fails, the caller shows [`show_load_error`].

use std::collections::HashMap;

use js_sys::Promise;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlImageElement};

use crate::config::{FISH_TYPES, FishType};
use crate::geometry::{ImageMetrics, Size};

const FISH_RETRIES: u32 = 3;
const RETRY_DELAY_MS: i32 = 1_000;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {src} after {attempts} attempt(s)")]
    Load { src: String, attempts: u32 },
    #[error("browser API unavailable: {0}")]
    Dom(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for AssetError {
    fn from(v: JsValue) -> Self {
        AssetError::Js(format!("{v:?}"))
    }
}

impl From<AssetError> for JsValue {
    fn from(e: AssetError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Where every image lives.
#[derive(Clone, Debug)]
pub struct AssetManifest {
    pub base: &'static str,
    pub pond_bg: &'static str,
    pub closeup_bg: &'static str,
    pub success_popup: &'static str,
    pub second_screen: &'static str,
    pub third_screen: &'static str,
    pub fish_types: &'static [FishType],
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            base: "/images/",
            pond_bg: "pond_bg.jpg",
            closeup_bg: "fish_closeup_bg.jpg",
            success_popup: "success_popup.png",
            second_screen: "second_screen.png",
            third_screen: "third_screen.png",
            fish_types: &FISH_TYPES,
        }
    }
}

impl AssetManifest {
    fn url(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }
}

pub struct Assets {
    pub pond_bg: HtmlImageElement,
    pub closeup_bg: HtmlImageElement,
    pub success_popup: HtmlImageElement,
    pub second_screen: HtmlImageElement,
    pub third_screen: HtmlImageElement,
    fish: HashMap<&'static str, HtmlImageElement>, // keyed by sprite file name
    closeups: HashMap<&'static str, HtmlImageElement>,
}

impl Assets {
    pub fn fish_sprite(&self, sprite: &str) -> Option<&HtmlImageElement> {
        self.fish.get(sprite)
    }

    pub fn closeup_sprite(&self, closeup: &str) -> Option<&HtmlImageElement> {
        self.closeups.get(closeup)
    }
}

/// Natural size of a fully decoded image.
pub fn loaded_size(img: &HtmlImageElement) -> Option<Size> {
    (img.complete() && img.natural_width() > 0 && img.natural_height() > 0)
        .then(|| Size::new(img.natural_width() as f64, img.natural_height() as f64))
}

impl ImageMetrics for Assets {
    fn closeup_size(&self, closeup: &str) -> Option<Size> {
        self.closeup_sprite(closeup).and_then(loaded_size)
    }

    fn popup_size(&self) -> Option<Size> {
        loaded_size(&self.success_popup)
    }

    fn second_screen_size(&self) -> Option<Size> {
        loaded_size(&self.second_screen)
    }
}

/// Start fetching `src`; the returned promise settles on load or error.
fn request(src: &str) -> Result<(HtmlImageElement, Promise), AssetError> {
    let img = HtmlImageElement::new()?;
    let promise = Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(src);
    Ok((img, promise))
}

async fn settle(img: HtmlImageElement, promise: Promise) -> Result<HtmlImageElement, JsValue> {
    let result = JsFuture::from(promise).await;
    img.set_onload(None);
    img.set_onerror(None);
    result.map(|_| img)
}

async fn sleep(ms: i32) -> Result<(), AssetError> {
    let win = web_sys::window().ok_or(AssetError::Dom("window"))?;
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled = win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    // A timer that was never scheduled would leave the promise pending forever.
    scheduled?;
    JsFuture::from(promise).await?;
    Ok(())
}

async fn load_with_retry(src: &str, retries: u32) -> Result<HtmlImageElement, AssetError> {
    for attempt in 1..=retries {
        log::info!("loading image {src}");
        let (img, promise) = request(src)?;
        match settle(img, promise).await {
            Ok(img) => {
                log::info!("loaded image {src}");
                return Ok(img);
            }
            Err(_) if attempt < retries => {
                log::warn!("image {src} failed (attempt {attempt}/{retries}), retrying");
                sleep(RETRY_DELAY_MS).await?;
            }
            Err(_) => break,
        }
    }
    log::error!("image {src} failed after {retries} attempts");
    Err(AssetError::Load {
        src: src.to_string(),
        attempts: retries,
    })
}

pub async fn load_all(manifest: &AssetManifest) -> Result<Assets, AssetError> {
    log::info!("loading all images");

    // Kick off the scene images together, then wait on each.
    let names = [
        manifest.pond_bg,
        manifest.closeup_bg,
        manifest.success_popup,
        manifest.second_screen,
        manifest.third_screen,
    ];
    let mut pending = Vec::with_capacity(names.len());
    for name in names {
        let src = manifest.url(name);
        let (img, promise) = request(&src)?;
        pending.push((src, img, promise));
    }
    let mut scene = Vec::with_capacity(pending.len());
    for (src, img, promise) in pending {
        match settle(img, promise).await {
            Ok(img) => {
                log::info!("loaded image {src}");
                scene.push(img);
            }
            Err(_) => {
                log::error!("image {src} failed");
                return Err(AssetError::Load { src, attempts: 1 });
            }
        }
    }
    let [pond_bg, closeup_bg, success_popup, second_screen, third_screen]: [HtmlImageElement; 5] =
        scene
            .try_into()
            .map_err(|_| AssetError::Js("scene image count".to_string()))?;

    let mut fish = HashMap::new();
    let mut closeups = HashMap::new();
    for kind in manifest.fish_types {
        fish.insert(
            kind.sprite,
            load_with_retry(&manifest.url(kind.sprite), FISH_RETRIES).await?,
        );
        closeups.insert(
            kind.closeup,
            load_with_retry(&manifest.url(kind.closeup), FISH_RETRIES).await?,
        );
        log::info!("{} sprites ready", kind.name);
    }

    log::info!("all images loaded");
    Ok(Assets {
        pond_bg,
        closeup_bg,
        success_popup,
        second_screen,
        third_screen,
        fish,
        closeups,
    })
}

/// Centered panel telling the player loading failed, with a reload button.
pub fn show_load_error(doc: &Document) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let div = doc.create_element("div")?;
    div.set_id("fp-load-error");
    div.set_attribute("style", "position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); background-color:rgba(0,0,0,0.8); color:white; padding:20px; border-radius:10px; text-align:center; font-family:sans-serif; z-index:50;").ok();
    div.set_inner_html(
        "<h3>Failed to load the game</h3>\
         <p>Please check your network connection and try again</p>\
         <button onclick=\"location.reload()\" style=\"padding:10px 20px; margin-top:10px; cursor:pointer;\">Reload</button>",
    );
    body.append_child(&div)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_urls() {
        let m = AssetManifest::default();
        assert_eq!(m.url(m.pond_bg), "/images/pond_bg.jpg");
        assert_eq!(m.url(m.fish_types[2].closeup), "/images/fish3_closeup.png");
    }

    #[test]
    fn test_load_error_message() {
        let e = AssetError::Load {
            src: "/images/fish1.png".to_string(),
            attempts: 3,
        };
        assert_eq!(
            e.to_string(),
            "failed to load image /images/fish1.png after 3 attempt(s)"
        );
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::super::sleep;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        async fn test_sleep_settles() {
            assert!(sleep(0).await.is_ok());
        }
    }
}
