//! Greedy single-pass color clustering in Lab space.
//!
//! Pixels are visited in row-major order. Each one joins the *first*
//! existing cluster whose running Lab centroid lies closer than the
//! threshold, otherwise it seeds a new cluster. Centroids move as pixels
//! join, so membership depends on scan order; clusters are never merged,
//! split, or re-assigned afterwards.

use tracing::trace;

use crate::buffer::PixelBuffer;
use crate::color::{LabColor, lab_distance, rgb_to_hex, rgb_to_lab};
use crate::region::RegionPredicate;

/// A group of perceptually similar pixels with its running averages.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    count: usize,
    sum_rgb: [f64; 3],
    sum_lab: [f64; 3],
    average_rgb: [f64; 3],
    average_lab: LabColor,
}

impl Cluster {
    fn seed(rgb: [f64; 3], lab: LabColor) -> Self {
        Self {
            count: 1,
            sum_rgb: rgb,
            sum_lab: [lab.l, lab.a, lab.b],
            average_rgb: rgb,
            average_lab: lab,
        }
    }

    fn absorb(&mut self, rgb: [f64; 3], lab: LabColor) {
        self.count += 1;
        for (sum, v) in self.sum_rgb.iter_mut().zip(rgb) {
            *sum += v;
        }
        self.sum_lab[0] += lab.l;
        self.sum_lab[1] += lab.a;
        self.sum_lab[2] += lab.b;

        let n = self.count as f64;
        self.average_rgb = self.sum_rgb.map(|s| s / n);
        self.average_lab = LabColor::new(self.sum_lab[0] / n, self.sum_lab[1] / n, self.sum_lab[2] / n);
    }

    /// Number of pixels assigned so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean sRGB of the members, channels in `0.0..=255.0`.
    pub fn average_rgb(&self) -> [f64; 3] {
        self.average_rgb
    }

    /// Mean Lab of the members; the centroid used for matching.
    pub fn average_lab(&self) -> LabColor {
        self.average_lab
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.average_rgb)
    }
}

/// Cluster the visible pixels of `buffer` that fall inside `region`.
///
/// Returns clusters in creation order. A pixel joins a cluster only when
/// its distance to the centroid is strictly below `threshold`.
pub fn cluster_pixels<P>(buffer: &PixelBuffer<'_>, region: &P, threshold: f64) -> Vec<Cluster>
where
    P: RegionPredicate + ?Sized,
{
    let mut clusters: Vec<Cluster> = Vec::new();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if !region.contains(x, y) {
                continue;
            }
            let [r, g, b, a] = buffer.pixel(x, y);
            if a == 0 {
                continue;
            }

            let lab = rgb_to_lab(r, g, b);
            let rgb = [r as f64, g as f64, b as f64];

            match clusters
                .iter_mut()
                .find(|c| lab_distance(&lab, &c.average_lab) < threshold)
            {
                Some(cluster) => cluster.absorb(rgb, lab),
                None => {
                    trace!(x, y, index = clusters.len(), "new cluster");
                    clusters.push(Cluster::seed(rgb, lab));
                }
            }
        }
    }

    clusters
}

/// Sort clusters by descending member count. Stable: ties keep creation order.
pub fn sort_by_count(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
}
