//! Error type for the public API.

use thiserror::Error;

/// Everything that can stop an enhancement run.
///
/// All variants are fatal for the invocation that produced them; nothing is
/// retried.
///
/// ```
/// use photo_enhance::{EnhanceError, PresetId};
///
/// let err = "vaporwave".parse::<PresetId>().unwrap_err();
/// assert!(matches!(err, EnhanceError::UnknownPreset(ref name) if name == "vaporwave"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnhanceError {
    /// Zero-area buffer, unsupported channel count, length mismatch or a
    /// non-finite input sample
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Preset name that none of the 18 presets answers to
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// An operation produced unusable output
    #[error("operation {operation} failed: {detail}")]
    OperationFailure {
        operation: &'static str,
        detail: String,
    },
}
