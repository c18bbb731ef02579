use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::PixelBuffer;

/// Delivery format hint.
///
/// The core never encodes; the hint only decides alpha handling and the
/// deepest bit depth the encoder may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Jpg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format: {0} (expected jpg or png)")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    pub fn supports_alpha(self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// 8 for JPEG, 16 for PNG.
    pub fn max_bit_depth(self) -> u8 {
        match self {
            OutputFormat::Jpg => 8,
            OutputFormat::Png => 16,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Bring a finished buffer in line with the format: JPEG has no alpha,
    /// so alpha is made opaque (the channel itself stays).
    pub(crate) fn finalize(self, buffer: &mut PixelBuffer) {
        if !self.supports_alpha() {
            buffer.flatten_alpha();
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
