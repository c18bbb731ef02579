//! Image characterization.
//!
//! [`analyze`] reads a buffer once and condenses it into a
//! [`CharacteristicVector`]. It never mutates the buffer, runs in linear time
//! with a constant number of passes, and returns the same vector for the same
//! pixels regardless of the parallel flag.

mod noise;
mod stats;

use std::fmt;

use crate::buffer::PixelBuffer;

/// Luma below which an image counts as low light (80 of 255).
pub const LOW_LIGHT: f32 = 80.0 / 255.0;

/// Luma above which an image counts as high key (180 of 255).
pub const HIGH_KEY: f32 = 180.0 / 255.0;

/// Numeric summary of one image. All fields are finite.
///
/// Degenerate input (zero area, constant color, smaller than 3x3) still
/// yields a valid vector with boundary values such as zero contrast or zero
/// noise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacteristicVector {
    /// Mean Rec.601 luma
    pub brightness: f32,
    /// Standard deviation of luma, scaled so 0.5 maps to 1.0
    pub contrast: f32,
    /// Estimated noise sigma in luma units
    pub noise: f32,
    /// Mean HSV saturation
    pub saturation: f32,
    /// Mean normalized gradient magnitude, 0.0..=1.0
    pub sharpness: f32,
    pub dark_ratio: f32,
    pub bright_ratio: f32,
    pub skin_ratio: f32,
    pub green_ratio: f32,
    pub blue_ratio: f32,
    pub warm_ratio: f32,
    /// Mean R, G, B
    pub channel_means: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTemperature {
    Warm,
    Cool,
    Neutral,
}

impl CharacteristicVector {
    pub fn is_low_light(&self) -> bool {
        self.brightness < LOW_LIGHT
    }

    pub fn is_high_key(&self) -> bool {
        self.brightness > HIGH_KEY
    }

    /// How far red falls below the mean of green and blue; 0.0 when red is
    /// not attenuated.
    pub fn red_deficit(&self) -> f32 {
        let [r, g, b] = self.channel_means;
        ((g + b) * 0.5 - r).max(0.0)
    }

    pub fn color_temperature(&self) -> ColorTemperature {
        if self.warm_ratio > self.blue_ratio * 1.5 {
            ColorTemperature::Warm
        } else if self.blue_ratio > self.warm_ratio * 1.5 {
            ColorTemperature::Cool
        } else {
            ColorTemperature::Neutral
        }
    }
}

/// One readable field of a [`CharacteristicVector`], the input side of an
/// adaptation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    Brightness,
    Contrast,
    Noise,
    Saturation,
    Sharpness,
    DarkRatio,
    BrightRatio,
    SkinRatio,
    GreenRatio,
    BlueRatio,
    WarmRatio,
    RedDeficit,
}

impl Characteristic {
    pub fn read(self, v: &CharacteristicVector) -> f32 {
        match self {
            Characteristic::Brightness => v.brightness,
            Characteristic::Contrast => v.contrast,
            Characteristic::Noise => v.noise,
            Characteristic::Saturation => v.saturation,
            Characteristic::Sharpness => v.sharpness,
            Characteristic::DarkRatio => v.dark_ratio,
            Characteristic::BrightRatio => v.bright_ratio,
            Characteristic::SkinRatio => v.skin_ratio,
            Characteristic::GreenRatio => v.green_ratio,
            Characteristic::BlueRatio => v.blue_ratio,
            Characteristic::WarmRatio => v.warm_ratio,
            Characteristic::RedDeficit => v.red_deficit(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Characteristic::Brightness => "brightness",
            Characteristic::Contrast => "contrast",
            Characteristic::Noise => "noise",
            Characteristic::Saturation => "saturation",
            Characteristic::Sharpness => "sharpness",
            Characteristic::DarkRatio => "dark_ratio",
            Characteristic::BrightRatio => "bright_ratio",
            Characteristic::SkinRatio => "skin_ratio",
            Characteristic::GreenRatio => "green_ratio",
            Characteristic::BlueRatio => "blue_ratio",
            Characteristic::WarmRatio => "warm_ratio",
            Characteristic::RedDeficit => "red_deficit",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Characterize `buffer`.
///
/// ```
/// use photo_enhance::{analyze, PixelBuffer};
///
/// let gray = PixelBuffer::filled(16, 16, 3, 0.5).unwrap();
/// let v = analyze(&gray, false);
/// assert!((v.brightness - 0.5).abs() < 1e-6);
/// assert_eq!(v.noise, 0.0);
/// ```
pub fn analyze(buffer: &PixelBuffer, parallel: bool) -> CharacteristicVector {
    if buffer.is_empty() {
        return CharacteristicVector::default();
    }

    let stats = stats::measure(buffer, parallel);
    let luma = buffer.luma_plane(parallel);
    let detail = noise::estimate(&luma, buffer.width(), buffer.height(), parallel);

    let sanitize = |v: f32| if v.is_finite() { v } else { 0.0 };
    CharacteristicVector {
        brightness: sanitize(stats.mean_luma()).clamp(0.0, 1.0),
        contrast: sanitize(stats.luma_std() / 0.5).clamp(0.0, 1.0),
        noise: sanitize(detail.noise),
        saturation: sanitize(stats.ratio_f(stats.saturation_sum)),
        sharpness: sanitize(detail.sharpness),
        dark_ratio: stats.ratio(stats.dark),
        bright_ratio: stats.ratio(stats.bright),
        skin_ratio: stats.ratio(stats.skin),
        green_ratio: stats.ratio(stats.green),
        blue_ratio: stats.ratio(stats.blue),
        warm_ratio: stats.ratio(stats.warm),
        channel_means: stats.channel_sums.map(|s| sanitize(stats.ratio_f(s))),
    }
}
