//! Extraction options and their defaults.

use serde::{Deserialize, Serialize};

use crate::region::{EDGE_MARGIN, Region};
use crate::{Error, Result};

/// Longest side, in pixels, an image is downsampled to before clustering.
pub const DEFAULT_MAX_SIZE: u32 = 100;

/// Lab distance under which a pixel joins an existing cluster.
/// Values between 8 and 12 work well for most photographs.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Tuning knobs for a palette extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Downsample bound. Only used when decoding an image; the clustering
    /// core works on whatever buffer it is handed.
    pub max_size: u32,
    pub threshold: Threshold,
    /// Width of the top/right/bottom/left bands.
    pub margin: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            threshold: Threshold::default(),
            margin: EDGE_MARGIN,
        }
    }
}

impl Options {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::InvalidOption("max_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Clustering threshold, either shared by every region or set per region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Uniform(f64),
    PerRegion(RegionThresholds),
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Uniform(DEFAULT_THRESHOLD)
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Threshold::Uniform(value)
    }
}

impl From<RegionThresholds> for Threshold {
    fn from(value: RegionThresholds) -> Self {
        Threshold::PerRegion(value)
    }
}

/// Per-region overrides; unset entries use [`DEFAULT_THRESHOLD`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionThresholds {
    pub primary: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// Fully resolved thresholds, one per region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub primary: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Thresholds {
    pub fn for_region(&self, region: Region) -> f64 {
        match region {
            Region::Full => self.primary,
            Region::Top => self.top,
            Region::Right => self.right,
            Region::Bottom => self.bottom,
            Region::Left => self.left,
        }
    }
}

/// Zero, negative and non-finite values count as unset.
fn or_default(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_THRESHOLD,
    }
}

impl Threshold {
    pub fn resolve(&self) -> Thresholds {
        match *self {
            Threshold::Uniform(v) => {
                let v = or_default(Some(v));
                Thresholds {
                    primary: v,
                    top: v,
                    right: v,
                    bottom: v,
                    left: v,
                }
            }
            Threshold::PerRegion(t) => Thresholds {
                primary: or_default(t.primary),
                top: or_default(t.top),
                right: or_default(t.right),
                bottom: or_default(t.bottom),
                left: or_default(t.left),
            },
        }
    }
}
