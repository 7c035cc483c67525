//! Palette selection: a dominant pair from the whole image plus one
//! color per edge band.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::cluster::{Cluster, cluster_pixels, sort_by_count};
use crate::options::{Options, Thresholds};
use crate::region::Region;
use crate::{Error, Result};

/// Colors sampled from the four edge bands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColors {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

/// Extracted palette, each color as lowercase `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteResult {
    /// Average color of the largest cluster.
    pub primary_color: String,
    /// Second largest cluster, or the primary again when there is only one.
    pub secondary_color: String,
    pub background_color: BackgroundColors,
}

/// Axis of a two-stop CSS gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "native-bin", derive(clap::ValueEnum))]
pub enum GradientDirection {
    /// Left edge color to right edge color.
    #[default]
    Horizontal,
    /// Top edge color to bottom edge color.
    Vertical,
}

impl PaletteResult {
    /// Render the edge colors as a CSS `linear-gradient`.
    pub fn css_gradient(&self, direction: GradientDirection) -> String {
        let bg = &self.background_color;
        match direction {
            GradientDirection::Horizontal => {
                format!("linear-gradient(to right, {}, {})", bg.left, bg.right)
            }
            GradientDirection::Vertical => {
                format!("linear-gradient(to bottom, {}, {})", bg.top, bg.bottom)
            }
        }
    }
}

/// Extract a palette from a decoded pixel buffer.
///
/// Fails with [`Error::EmptyBuffer`] when no pixel is visible. Edge bands
/// with no visible pixel fall back to the primary color.
pub fn extract(buffer: &PixelBuffer<'_>, options: &Options) -> Result<PaletteResult> {
    let thresholds = options.threshold.resolve();
    let (width, height) = (buffer.width(), buffer.height());

    let mut clusters = cluster_pixels(
        buffer,
        &Region::Full.bounds(width, height, options.margin),
        thresholds.primary,
    );
    sort_by_count(&mut clusters);
    debug!(width, height, clusters = clusters.len(), "clustered full image");

    let (primary, secondary) = match clusters.as_slice() {
        [] => return Err(Error::EmptyBuffer),
        [only] => (only, only),
        [first, second, ..] => (first, second),
    };
    let primary_color = primary.hex();
    let secondary_color = secondary.hex();

    let [top, right, bottom, left] = edge_colors(buffer, options.margin, &thresholds)
        .map(|cluster| cluster.map_or_else(|| primary_color.clone(), |c| c.hex()));

    let result = PaletteResult {
        primary_color,
        secondary_color,
        background_color: BackgroundColors {
            top,
            right,
            bottom,
            left,
        },
    };
    debug!(?result, "extracted palette");
    Ok(result)
}

/// Largest cluster of one region, if the region has any visible pixel.
fn dominant(buffer: &PixelBuffer<'_>, region: Region, margin: u32, thresholds: &Thresholds) -> Option<Cluster> {
    let bounds = region.bounds(buffer.width(), buffer.height(), margin);
    let mut clusters = cluster_pixels(buffer, &bounds, thresholds.for_region(region));
    debug!(?region, clusters = clusters.len(), "clustered edge band");
    sort_by_count(&mut clusters);
    clusters.into_iter().next()
}

/// Dominant clusters of the edge bands in `Region::EDGES` order.
#[cfg(not(feature = "parallel"))]
fn edge_colors(buffer: &PixelBuffer<'_>, margin: u32, thresholds: &Thresholds) -> [Option<Cluster>; 4] {
    Region::EDGES.map(|region| dominant(buffer, region, margin, thresholds))
}

/// Dominant clusters of the edge bands in `Region::EDGES` order.
#[cfg(feature = "parallel")]
fn edge_colors(buffer: &PixelBuffer<'_>, margin: u32, thresholds: &Thresholds) -> [Option<Cluster>; 4] {
    let run = |region| dominant(buffer, region, margin, thresholds);
    let ((top, right), (bottom, left)) = rayon::join(
        || rayon::join(|| run(Region::Top), || run(Region::Right)),
        || rayon::join(|| run(Region::Bottom), || run(Region::Left)),
    );
    [top, right, bottom, left]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{RegionThresholds, Threshold};
    use image::{Rgba, RgbaImage};

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn single_color_image_fills_every_slot() {
        let img = solid(20, 20, [255, 0, 0, 255]);
        let result = extract(&PixelBuffer::from_image(&img), &Options::default()).unwrap();

        assert_eq!(result.primary_color, "#ff0000");
        assert_eq!(result.secondary_color, "#ff0000");
        let bg = &result.background_color;
        for edge in [&bg.top, &bg.right, &bg.bottom, &bg.left] {
            assert_eq!(edge, "#ff0000");
        }
    }

    #[test]
    fn blue_and_red_halves() {
        let img = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([0, 0, 255, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });
        let buf = PixelBuffer::from_image(&img);

        let clusters = cluster_pixels(&buf, &|_: u32, _: u32| true, 10.0);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.count() == 8));

        // Equal counts: blue was seen first and stays first.
        let result = extract(&buf, &Options::default()).unwrap();
        assert_eq!(result.primary_color, "#0000ff");
        assert_eq!(result.secondary_color, "#ff0000");
    }

    #[test]
    fn fully_transparent_image_is_an_error() {
        let img = solid(8, 8, [200, 10, 10, 0]);
        let err = extract(&PixelBuffer::from_image(&img), &Options::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyBuffer));
    }

    #[test]
    fn zero_sized_image_is_an_error() {
        let buf = PixelBuffer::new(0, 0, &[]).unwrap();
        assert!(matches!(extract(&buf, &Options::default()), Err(Error::EmptyBuffer)));
    }

    #[test]
    fn transparent_top_band_falls_back_to_primary() {
        let img = RgbaImage::from_fn(20, 40, |_, y| {
            if y < 10 {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([0, 128, 0, 255])
            }
        });
        let result = extract(&PixelBuffer::from_image(&img), &Options::default()).unwrap();
        assert_eq!(result.primary_color, "#008000");
        assert_eq!(result.background_color.top, result.primary_color);
    }

    #[test]
    fn edges_follow_band_majority() {
        // 30x30 grey canvas: right band solid cyan, a 10px patch of another
        // color in the middle of each other band.
        let img = RgbaImage::from_fn(30, 30, |x, y| {
            if x >= 20 {
                Rgba([0, 255, 255, 255])
            } else if y < 10 && x >= 10 {
                Rgba([255, 0, 0, 255])
            } else if y >= 20 && x >= 10 {
                Rgba([0, 0, 255, 255])
            } else if x < 10 && (10..20).contains(&y) {
                Rgba([255, 255, 0, 255])
            } else {
                Rgba([128, 128, 128, 255])
            }
        });
        let result = extract(&PixelBuffer::from_image(&img), &Options::default()).unwrap();

        // Grey and cyan both cover 300 pixels; grey is met first.
        assert_eq!(result.primary_color, "#808080");
        assert_eq!(result.secondary_color, "#00ffff");

        let bg = &result.background_color;
        assert_eq!(bg.right, "#00ffff");
        // Top and bottom: 100 grey, 100 patch, 100 cyan; grey is met first.
        assert_eq!(bg.top, "#808080");
        assert_eq!(bg.bottom, "#808080");
        // Left: 200 grey around 100 yellow.
        assert_eq!(bg.left, "#808080");
    }

    #[test]
    fn custom_margin_narrows_bands() {
        let img = RgbaImage::from_fn(10, 10, |_, y| {
            if y == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let opts = Options {
            margin: 1,
            ..Default::default()
        };
        let result = extract(&PixelBuffer::from_image(&img), &opts).unwrap();
        assert_eq!(result.primary_color, "#000000");
        assert_eq!(result.background_color.top, "#ff0000");
        assert_eq!(result.background_color.bottom, "#000000");
    }

    #[test]
    fn per_region_threshold_is_honoured() {
        // Two greys ~8 ΔE apart: merged at 20, separate at 2.
        let img = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 1 {
                Rgba([119, 119, 119, 255])
            } else {
                Rgba([139, 139, 139, 255])
            }
        });
        let buf = PixelBuffer::from_image(&img);
        let opts = Options {
            threshold: Threshold::PerRegion(RegionThresholds {
                primary: Some(2.0),
                top: Some(20.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = extract(&buf, &opts).unwrap();
        assert_eq!(result.primary_color, "#8b8b8b");
        assert_eq!(result.secondary_color, "#777777");
        // One merged cluster, averaged with 4 pixels of 119 and 12 of 139.
        assert_eq!(result.background_color.top, "#868686");
    }

    #[test]
    fn repeated_calls_agree() {
        let img = RgbaImage::from_fn(16, 12, |x, y| Rgba([(x * 15) as u8, (y * 20) as u8, 90, 255]));
        let buf = PixelBuffer::from_image(&img);
        let opts = Options::default();
        assert_eq!(extract(&buf, &opts).unwrap(), extract(&buf, &opts).unwrap());
    }

    #[test]
    fn css_gradient_uses_edges() {
        let result = PaletteResult {
            primary_color: "#000000".into(),
            secondary_color: "#111111".into(),
            background_color: BackgroundColors {
                top: "#aaaaaa".into(),
                right: "#bbbbbb".into(),
                bottom: "#cccccc".into(),
                left: "#dddddd".into(),
            },
        };
        assert_eq!(
            result.css_gradient(GradientDirection::Horizontal),
            "linear-gradient(to right, #dddddd, #bbbbbb)"
        );
        assert_eq!(
            result.css_gradient(GradientDirection::Vertical),
            "linear-gradient(to bottom, #aaaaaa, #cccccc)"
        );
    }

    #[test]
    fn serializes_like_the_js_result() {
        let img = solid(2, 2, [1, 2, 3, 255]);
        let result = extract(&PixelBuffer::from_image(&img), &Options::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["primaryColor"], "#010203");
        assert_eq!(json["backgroundColor"]["left"], "#010203");
    }
}
