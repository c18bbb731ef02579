// Generated gamma tables and Oklab matrices carry more digits than f32 holds
#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::manual_range_contains
)]

//! photo-enhance: adaptive, preset-driven enhancement of decoded photographs
//!
//! The crate takes a decoded image, measures it, and runs one of 18 preset
//! schedules of tonal and color operations tuned to what it measured. It
//! performs no I/O: decoding and encoding belong to the caller.
//!
//! # Quick Start
//!
//! The [`Enhancer`] builder is the primary entry point:
//!
//! ```
//! use photo_enhance::{Enhancer, OutputFormat, PixelBuffer, PresetId};
//!
//! let buffer = PixelBuffer::filled(32, 24, 3, 0.25).unwrap();
//! let result = Enhancer::new()
//!     .enhance(buffer, PresetId::Night, OutputFormat::Jpg)
//!     .unwrap();
//!
//! assert_eq!((result.width(), result.height()), (32, 24));
//! ```
//!
//! Presets can also be chosen by name, which is what a command line or a
//! job queue hands over:
//!
//! ```
//! use photo_enhance::{EnhanceError, Enhancer, OutputFormat, PixelBuffer};
//!
//! let buffer = PixelBuffer::filled(8, 8, 3, 0.5).unwrap();
//! let err = Enhancer::new()
//!     .enhance_named(buffer, "sepia", OutputFormat::Jpg)
//!     .unwrap_err();
//! assert!(matches!(err, EnhanceError::UnknownPreset(_)));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer + PresetId + OutputFormat
//!     |
//!     v
//! analyze()            one read-only pass -> CharacteristicVector
//!     |
//!     v
//! adapt()              preset base values + rule deltas, clamped
//!     |                -> EffectiveParameterSet
//!     v
//! ops::apply() x N     steps in preset order, buffer edited in place
//!     |
//!     v
//! OutputFormat         alpha handling, target bit depth
//! ```
//!
//! # Presets Are Data
//!
//! Every preset is a static [`PresetDefinition`]: a list of steps, each an
//! operation with base values and [`Rule`]s. A rule reads one
//! [`Characteristic`] and adds a [`Curve`]-shaped delta to one parameter,
//! e.g. "raise exposure strength by 3.0 per unit of brightness below 0.4".
//! The engine then applies one global guard: on noisy images (noise above
//! [`NOISE_HIGH`]) denoising may only grow and sharpening may only shrink
//! relative to the preset's base values.
//!
//! # Color Spaces
//!
//! Buffers hold gamma-encoded sRGB. Lightness edits go through [`Oklab`] so
//! they do not shift hue, saturation edits scale Oklch chroma, and [`Hsv`]
//! is used for classification only (skin, hue bands, vibrance weights).
//!
//! # Determinism
//!
//! Identical inputs give bit-identical outputs. Row-parallel execution (see
//! [`Enhancer::parallel`]) computes rows independently and merges any
//! whole-image statistic in a fixed band order, so turning it off changes
//! speed, never pixels. Film grain draws from per-row seeded generators.

pub mod adapt;
pub mod analysis;
pub mod api;
pub mod buffer;
pub mod color;
pub mod ops;
pub(crate) mod parallel;
pub mod presets;

#[cfg(test)]
mod domain_tests;

pub use adapt::{adapt, Curve, EffectiveParameterSet, Param, ParamSet, Rule, NOISE_HIGH};
pub use analysis::{analyze, Characteristic, CharacteristicVector, ColorTemperature};
pub use api::{EnhanceError, EnhancedImage, Enhancer, PipelineResult};
pub use buffer::{OutputFormat, PixelBuffer, UnknownFormat};
pub use color::{Hsv, LinearRgb, Oklab, Srgb};
pub use ops::{ExecContext, OpKind};
pub use presets::{PresetDefinition, PresetError, PresetId, Step};
