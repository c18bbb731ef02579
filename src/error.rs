use photo_enhance::EnhanceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported image layout: {0}")]
    UnsupportedLayout(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Enhancement failed: {0}")]
    Enhance(#[from] EnhanceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => AppError::Io(io),
            image::ImageError::Encoding(e) => AppError::Encode(e.to_string()),
            other => AppError::Decode(other.to_string()),
        }
    }
}
