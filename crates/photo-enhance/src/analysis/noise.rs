//! Noise and sharpness from 3x3 neighbourhoods of the luma plane.
//!
//! Noise uses the Immerkær mask
//!
//! ```text
//!  1 -2  1
//! -2  4 -2
//!  1 -2  1
//! ```
//!
//! which is the product of two second differences. A straight edge, a ramp or
//! a flat block has zero response along at least one axis, so only corners
//! and random fluctuation leave a residual. The median absolute residual,
//! taken over pixels whose Sobel gradient is below [`EDGE_THRESHOLD`], is
//! then converted to a Gaussian sigma. The median comes from a fixed-bin
//! histogram, which keeps the pass linear and merges across bands without
//! any order dependence.

use crate::parallel;

const HIST_BINS: usize = 2048;

/// Residual magnitudes at or above this land in the last bin.
const HIST_RANGE: f32 = 2.0;

/// Normalized Sobel magnitude above which a pixel counts as an edge.
const EDGE_THRESHOLD: f32 = 0.25;

/// If fewer than this share of pixels are flat, estimate from all of them.
const MIN_FLAT_FRACTION: f64 = 0.1;

/// Mean gradient that maps to sharpness 1.0.
const SHARPNESS_SCALE: f32 = 0.15;

/// L2 norm of the mask: the residual of unit-variance white noise has this
/// standard deviation.
const MASK_NORM: f32 = 6.0;

/// Median absolute deviation to sigma for a normal distribution.
const MAD_TO_SIGMA: f32 = 1.4826;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct DetailEstimate {
    pub noise: f32,
    pub sharpness: f32,
}

struct DetailBand {
    flat: Vec<u32>,
    all: Vec<u32>,
    flat_count: u64,
    all_count: u64,
    gradient_sum: f64,
}

impl DetailBand {
    fn new() -> Self {
        Self {
            flat: vec![0; HIST_BINS],
            all: vec![0; HIST_BINS],
            flat_count: 0,
            all_count: 0,
            gradient_sum: 0.0,
        }
    }

    fn merge(&mut self, other: &Self) {
        for (a, b) in self.flat.iter_mut().zip(&other.flat) {
            *a += b;
        }
        for (a, b) in self.all.iter_mut().zip(&other.all) {
            *a += b;
        }
        self.flat_count += other.flat_count;
        self.all_count += other.all_count;
        self.gradient_sum += other.gradient_sum;
    }
}

#[inline]
fn bin(residual: f32) -> usize {
    ((residual.abs() / HIST_RANGE) * HIST_BINS as f32).min((HIST_BINS - 1) as f32) as usize
}

/// Lower edge of the bin holding the median sample.
fn histogram_median(hist: &[u32], count: u64) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let target = count.div_ceil(2);
    let mut seen = 0u64;
    for (i, &n) in hist.iter().enumerate() {
        seen += n as u64;
        if seen >= target {
            return i as f32 * HIST_RANGE / HIST_BINS as f32;
        }
    }
    HIST_RANGE
}

/// Estimate noise sigma and sharpness. Planes smaller than 3x3 have no
/// interior and report zero for both.
pub(crate) fn estimate(luma: &[f32], width: usize, height: usize, parallel: bool) -> DetailEstimate {
    if width < 3 || height < 3 {
        return DetailEstimate::default();
    }

    let bands = parallel::map_bands(height - 2, width, parallel, |rows| {
        let mut band = DetailBand::new();
        for y in rows.start + 1..rows.end + 1 {
            let above = &luma[(y - 1) * width..y * width];
            let here = &luma[y * width..(y + 1) * width];
            let below = &luma[(y + 1) * width..(y + 2) * width];
            for x in 1..width - 1 {
                let (l, r) = (x - 1, x + 1);
                let residual = above[l] - 2.0 * above[x] + above[r]
                    - 2.0 * here[l] + 4.0 * here[x] - 2.0 * here[r]
                    + below[l] - 2.0 * below[x] + below[r];
                let gx = (above[r] + 2.0 * here[r] + below[r]) - (above[l] + 2.0 * here[l] + below[l]);
                let gy = (below[l] + 2.0 * below[x] + below[r]) - (above[l] + 2.0 * above[x] + above[r]);
                let gradient = (gx * gx + gy * gy).sqrt() / 4.0;

                let b = bin(residual);
                band.all[b] += 1;
                band.all_count += 1;
                band.gradient_sum += gradient as f64;
                if gradient <= EDGE_THRESHOLD {
                    band.flat[b] += 1;
                    band.flat_count += 1;
                }
            }
        }
        band
    });

    let mut total = DetailBand::new();
    for band in &bands {
        total.merge(band);
    }

    let median = if total.flat_count as f64 >= MIN_FLAT_FRACTION * total.all_count as f64 {
        histogram_median(&total.flat, total.flat_count)
    } else {
        histogram_median(&total.all, total.all_count)
    };
    let mean_gradient = (total.gradient_sum / total.all_count.max(1) as f64) as f32;

    DetailEstimate {
        noise: MAD_TO_SIGMA * median / MASK_NORM,
        sharpness: (mean_gradient / SHARPNESS_SCALE).min(1.0),
    }
}
