//! Linear-light RGB, the space where Oklab conversions start.

use super::lut::srgb_to_linear;
use super::srgb::Srgb;

/// Linear light intensity per channel. May leave 0.0..=1.0 after Oklab edits
/// until it is encoded back to [`Srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}
