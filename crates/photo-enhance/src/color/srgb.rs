//! Gamma-encoded sRGB pixel.

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;

/// Rec.601 luma weights, applied to gamma-encoded values.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// A pixel as stored in a [`PixelBuffer`](crate::PixelBuffer): gamma-encoded
/// sRGB, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Srgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Read the first three samples of an interleaved pixel.
    #[inline]
    pub fn from_pixel(pixel: &[f32]) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Write back into the first three samples of an interleaved pixel,
    /// clamping to 0.0..=1.0. Any alpha sample is left alone.
    #[inline]
    pub fn write_to(self, pixel: &mut [f32]) {
        pixel[0] = self.r.clamp(0.0, 1.0);
        pixel[1] = self.g.clamp(0.0, 1.0);
        pixel[2] = self.b.clamp(0.0, 1.0);
    }

    /// Rec.601 luma.
    #[inline]
    pub fn luma(self) -> f32 {
        LUMA_WEIGHTS[0] * self.r + LUMA_WEIGHTS[1] * self.g + LUMA_WEIGHTS[2] * self.b
    }

    /// Add the same offset to every channel.
    #[inline]
    pub fn offset(self, delta: f32) -> Self {
        Self::new(self.r + delta, self.g + delta, self.b + delta)
    }
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}
