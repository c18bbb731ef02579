//! rawtone - adaptive enhancement for developed RAW photos
//!
//! Host around the `photo-enhance` core: decodes files into pixel buffers,
//! runs a preset, and encodes the result for delivery.
//! This library exposes modules for integration testing.

pub mod delivery;
pub mod error;
pub mod models;
pub mod services;

pub use error::AppError;
pub use models::{AppConfig, JpegQuality};
pub use services::{EnhanceOptions, EnhanceOutput, EnhancePipeline};
