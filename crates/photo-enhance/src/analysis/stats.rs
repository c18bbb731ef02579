//! Single-pass global statistics: tone, color and region ratios.

use std::ops::Range;

use crate::buffer::PixelBuffer;
use crate::color::{is_skin, Hsv, Srgb};
use crate::parallel;

const DARK_LUMA: f32 = 50.0 / 255.0;
const BRIGHT_LUMA: f32 = 200.0 / 255.0;

/// Minimum HSV saturation for a pixel to count toward a hue band.
const HUE_BAND_MIN_SATURATION: f32 = 40.0 / 255.0;

/// Accumulated sums for a band of rows. Merged in row order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ToneColorStats {
    pub pixels: u64,
    pub luma_sum: f64,
    pub luma_sq_sum: f64,
    pub saturation_sum: f64,
    pub channel_sums: [f64; 3],
    pub dark: u64,
    pub bright: u64,
    pub skin: u64,
    pub green: u64,
    pub blue: u64,
    pub warm: u64,
}

impl ToneColorStats {
    fn measure_rows(buffer: &PixelBuffer, rows: Range<usize>) -> Self {
        let mut stats = Self::default();
        for y in rows {
            for pixel in buffer.row(y).chunks_exact(buffer.channels()) {
                stats.add(Srgb::from_pixel(pixel));
            }
        }
        stats
    }

    fn add(&mut self, rgb: Srgb) {
        let luma = rgb.luma();
        let hsv = Hsv::from(rgb);

        self.pixels += 1;
        self.luma_sum += luma as f64;
        self.luma_sq_sum += (luma as f64) * (luma as f64);
        self.saturation_sum += hsv.s as f64;
        self.channel_sums[0] += rgb.r as f64;
        self.channel_sums[1] += rgb.g as f64;
        self.channel_sums[2] += rgb.b as f64;

        if luma < DARK_LUMA {
            self.dark += 1;
        }
        if luma > BRIGHT_LUMA {
            self.bright += 1;
        }
        if is_skin(rgb) {
            self.skin += 1;
        }
        if hsv.s > HUE_BAND_MIN_SATURATION {
            match hsv.h {
                h if (70.0..=170.0).contains(&h) => self.green += 1,
                h if (180.0..=260.0).contains(&h) => self.blue += 1,
                h if h <= 60.0 || h >= 320.0 => self.warm += 1,
                _ => {}
            }
        }
    }

    fn merge(&mut self, other: &Self) {
        self.pixels += other.pixels;
        self.luma_sum += other.luma_sum;
        self.luma_sq_sum += other.luma_sq_sum;
        self.saturation_sum += other.saturation_sum;
        for (sum, o) in self.channel_sums.iter_mut().zip(other.channel_sums) {
            *sum += o;
        }
        self.dark += other.dark;
        self.bright += other.bright;
        self.skin += other.skin;
        self.green += other.green;
        self.blue += other.blue;
        self.warm += other.warm;
    }

    pub fn mean_luma(&self) -> f32 {
        self.ratio_f(self.luma_sum)
    }

    pub fn luma_std(&self) -> f32 {
        if self.pixels == 0 {
            return 0.0;
        }
        let n = self.pixels as f64;
        let mean = self.luma_sum / n;
        ((self.luma_sq_sum / n - mean * mean).max(0.0)).sqrt() as f32
    }

    pub fn ratio(&self, count: u64) -> f32 {
        if self.pixels == 0 {
            0.0
        } else {
            (count as f64 / self.pixels as f64) as f32
        }
    }

    pub fn ratio_f(&self, sum: f64) -> f32 {
        if self.pixels == 0 {
            0.0
        } else {
            (sum / self.pixels as f64) as f32
        }
    }
}

/// Measure the whole buffer.
pub(crate) fn measure(buffer: &PixelBuffer, parallel: bool) -> ToneColorStats {
    let bands = parallel::map_bands(buffer.height(), buffer.row_len(), parallel, |rows| {
        ToneColorStats::measure_rows(buffer, rows)
    });
    let mut total = ToneColorStats::default();
    for band in &bands {
        total.merge(band);
    }
    total
}
