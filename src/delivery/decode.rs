use crate::error::AppError;
use image::{DynamicImage, ImageReader};
use photo_enhance::PixelBuffer;
use std::path::Path;

/// A decoded input with the sample depth it was stored at.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub buffer: PixelBuffer,
    /// 8 or 16; float sources count as 16
    pub bit_depth: u8,
}

/// Decode an image file, sniffing the format from its content.
pub fn decode_file(path: &Path) -> Result<DecodedImage, AppError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded input"
    );
    from_dynamic(image)
}

/// Decode an in-memory image.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, AppError> {
    let image = image::load_from_memory(bytes)?;
    from_dynamic(image)
}

/// Convert to the enhancer's float layout.
///
/// Grey inputs are expanded to RGB; alpha is kept. Deep inputs keep their
/// precision.
pub fn from_dynamic(image: DynamicImage) -> Result<DecodedImage, AppError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let color = image.color();
    let alpha = color.has_alpha();
    let deep = color.bytes_per_pixel() / color.channel_count() > 1;

    let buffer = match (deep, alpha) {
        (false, false) => PixelBuffer::from_u8(width, height, 3, image.to_rgb8().as_raw()),
        (false, true) => PixelBuffer::from_u8(width, height, 4, image.to_rgba8().as_raw()),
        (true, false) => PixelBuffer::from_u16(width, height, 3, image.to_rgb16().as_raw()),
        (true, true) => PixelBuffer::from_u16(width, height, 4, image.to_rgba16().as_raw()),
    }
    .map_err(|e| AppError::UnsupportedLayout(e.to_string()))?;

    Ok(DecodedImage {
        buffer,
        bit_depth: if deep { 16 } else { 8 },
    })
}
