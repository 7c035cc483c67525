//! Image acquisition: decode and downsample before clustering.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::{Error, Result};

/// Shrink `img` so neither side exceeds `max_size`, keeping the aspect
/// ratio. Images that already fit are returned at their original size.
pub fn downsample(img: &DynamicImage, max_size: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w <= max_size && h <= max_size {
        return img.to_rgba8();
    }

    let scale = (max_size as f64 / w as f64).min(max_size as f64 / h as f64);
    let out_w = ((w as f64 * scale).floor() as u32).max(1);
    let out_h = ((h as f64 * scale).floor() as u32).max(1);
    debug!(w, h, out_w, out_h, "downsampling");

    image::imageops::resize(img, out_w, out_h, FilterType::Triangle)
}

/// Decode an encoded image (PNG, JPEG, ...) and downsample it.
pub fn load_from_memory(input: &[u8], max_size: u32) -> Result<RgbaImage> {
    check_max_size(max_size)?;
    let img = image::load_from_memory(input)?;
    Ok(downsample(&img, max_size))
}

/// Read and decode an image file, then downsample it.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_from_path(path: &Path, max_size: u32) -> Result<RgbaImage> {
    check_max_size(max_size)?;
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(downsample(&img, max_size))
}

fn check_max_size(max_size: u32) -> Result<()> {
    if max_size == 0 {
        return Err(Error::InvalidOption("max_size must be at least 1".into()));
    }
    Ok(())
}
