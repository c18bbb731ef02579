//! Public API for the photo-enhance crate.
//!
//! This module provides the pipeline entry point: the [`Enhancer`] builder,
//! its [`EnhancedImage`] result and the unified [`EnhanceError`] type.

mod builder;
mod enhanced;
mod error;

pub use builder::Enhancer;
pub use enhanced::{EnhancedImage, PipelineResult};
pub use error::EnhanceError;
