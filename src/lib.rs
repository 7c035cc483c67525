//! Pick UI background colors that match an image.
//!
//! An image is reduced to a small palette: the two largest color clusters
//! of the whole image, plus the dominant color of each 10px edge band.
//! Clustering is a greedy single pass in CIE Lab space (see [`cluster`]).
//!
//! ```rust
//! use autohue::{Options, PixelBuffer, extract};
//!
//! let pixels = [255u8, 0, 0, 255].repeat(16);
//! let buffer = PixelBuffer::new(4, 4, &pixels)?;
//! let palette = extract(&buffer, &Options::default())?;
//! assert_eq!(palette.primary_color, "#ff0000");
//! # Ok::<(), autohue::Error>(())
//! ```

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod buffer;
pub mod cluster;
pub mod color;
pub mod error;
pub mod extract;
pub mod loader;
pub mod options;
pub mod region;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use extract::{BackgroundColors, GradientDirection, PaletteResult, extract};
pub use options::{Options, RegionThresholds, Threshold};
pub use region::{Region, RegionPredicate};

/// Decode an encoded image, downsample it to `options.max_size` and
/// extract its palette.
pub fn extract_palette_bytes(input: &[u8], options: &Options) -> Result<PaletteResult> {
    options.validate()?;
    let img = loader::load_from_memory(input, options.max_size)?;
    extract(&PixelBuffer::from_image(&img), options)
}

/// Same as [`extract_palette_bytes`], reading the image from disk.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_path(path: &std::path::Path, options: &Options) -> Result<PaletteResult> {
    options.validate()?;
    let img = loader::load_from_path(path, options.max_size)?;
    extract(&PixelBuffer::from_image(&img), options)
}

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn get(target: &JsValue, key: &str) -> std::result::Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

/// Read `{ maxSize?, margin?, threshold? }` where `threshold` is a number
/// or `{ primary?, top?, right?, bottom?, left? }`.
fn options_from_js(value: &JsValue) -> std::result::Result<Options, JsValue> {
    let mut options = Options::default();
    if value.is_undefined() || value.is_null() {
        return Ok(options);
    }

    if let Some(max_size) = get(value, "maxSize")?.as_f64() {
        options.max_size = max_size as u32;
    }
    if let Some(margin) = get(value, "margin")?.as_f64() {
        options.margin = margin as u32;
    }

    let threshold = get(value, "threshold")?;
    if let Some(t) = threshold.as_f64() {
        options.threshold = Threshold::Uniform(t);
    } else if threshold.is_object() {
        let region = |key| get(&threshold, key).map(|v| v.as_f64());
        options.threshold = Threshold::PerRegion(RegionThresholds {
            primary: region("primary")?,
            top: region("top")?,
            right: region("right")?,
            bottom: region("bottom")?,
            left: region("left")?,
        });
    }

    Ok(options)
}

/// Extract `{ primaryColor, secondaryColor, backgroundColor: { top, right,
/// bottom, left } }` from an encoded image.
#[wasm_bindgen]
pub fn autohue(input: Vec<u8>, options: JsValue) -> std::result::Result<Object, JsValue> {
    let options = options_from_js(&options)?;
    let palette = extract_palette_bytes(&input, &options).map_err(to_js)?;

    let bg = &palette.background_color;
    let background = Object::new();
    Reflect::set(&background, &JsValue::from_str("top"), &JsValue::from_str(&bg.top))?;
    Reflect::set(&background, &JsValue::from_str("right"), &JsValue::from_str(&bg.right))?;
    Reflect::set(&background, &JsValue::from_str("bottom"), &JsValue::from_str(&bg.bottom))?;
    Reflect::set(&background, &JsValue::from_str("left"), &JsValue::from_str(&bg.left))?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("primaryColor"), &JsValue::from_str(&palette.primary_color))?;
    Reflect::set(&result, &JsValue::from_str("secondaryColor"), &JsValue::from_str(&palette.secondary_color))?;
    Reflect::set(&result, &JsValue::from_str("backgroundColor"), &background)?;

    Ok(result)
}
