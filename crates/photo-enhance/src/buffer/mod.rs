//! Pixel storage and the delivery format hint.

mod format;
mod pixel_buffer;

pub use format::{OutputFormat, UnknownFormat};
pub use pixel_buffer::PixelBuffer;
