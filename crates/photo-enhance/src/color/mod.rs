//! Color types and conversions
//!
//! Buffers hold gamma-encoded sRGB. Operations pick the space that suits
//! them:
//!
//! - [`Srgb`]: storage, Rec.601 luma, per-channel curves
//! - [`LinearRgb`]: the bridge into Oklab (gamma decode via LUT)
//! - [`Oklab`]: lightness edits that must not shift hue
//! - `Oklch`: chroma scaling and hue rotation
//! - [`Hsv`]: classification only (hue bands, skin, vibrance weights)
//!
//! ```
//! use photo_enhance::{Oklab, Srgb};
//!
//! let orange = Srgb::new(0.9, 0.5, 0.2);
//! let lab = Oklab::from_srgb(orange);
//! assert!(lab.a > 0.0 && lab.b > 0.0);
//! ```

mod hsv;
mod linear_rgb;
mod lut;
mod oklab;
mod oklch;
mod srgb;

pub use hsv::{is_skin, Hsv};
pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub(crate) use oklch::Oklch;
pub use srgb::{Srgb, LUMA_WEIGHTS};
