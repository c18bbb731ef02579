//! Result of one enhancement run.

use crate::adapt::EffectiveParameterSet;
use crate::analysis::CharacteristicVector;
use crate::buffer::PixelBuffer;

use super::EnhanceError;

/// The enhanced buffer together with what the pipeline decided on the way.
#[derive(Debug, Clone)]
pub struct EnhancedImage {
    /// Same width, height and channel count as the input
    pub buffer: PixelBuffer,
    /// Characteristics of the input, measured once before any operation
    pub characteristics: CharacteristicVector,
    /// The schedule that was applied
    pub parameters: EffectiveParameterSet,
    /// Deepest bit depth the requested format can carry (8 or 16)
    pub max_bit_depth: u8,
}

impl EnhancedImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Drop the metadata and keep the pixels.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

pub type PipelineResult = Result<EnhancedImage, EnhanceError>;
