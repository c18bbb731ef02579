use crate::error::AppError;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel, Rgb, Rgba};
use photo_enhance::PixelBuffer;

/// Longest side of the unenhanced comparison preview.
pub const PREVIEW_MAX_SIDE: u32 = 1080;

/// Dimensions that fit `width`x`height` inside the box, keeping the aspect
/// ratio. Never upscales; never returns a zero side.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);
    if scale >= 1.0 {
        return (width, height);
    }
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (w, h)
}

/// Scale `buffer` down with Lanczos3 until it fits the box.
pub fn fit_within(
    buffer: PixelBuffer,
    max_width: u32,
    max_height: u32,
) -> Result<PixelBuffer, AppError> {
    let (width, height) = (buffer.width() as u32, buffer.height() as u32);
    let (new_width, new_height) = fit_dimensions(width, height, max_width, max_height);
    if (new_width, new_height) == (width, height) {
        return Ok(buffer);
    }

    tracing::debug!(width, height, new_width, new_height, "Resizing for delivery");

    let channels = buffer.channels();
    let data = match channels {
        3 => lanczos::<Rgb<f32>>(buffer.into_data(), width, height, new_width, new_height)?,
        _ => lanczos::<Rgba<f32>>(buffer.into_data(), width, height, new_width, new_height)?,
    };
    PixelBuffer::new(new_width as usize, new_height as usize, channels, data)
        .map_err(|e| AppError::UnsupportedLayout(e.to_string()))
}

/// Fit into the preview box.
pub fn preview(buffer: PixelBuffer) -> Result<PixelBuffer, AppError> {
    fit_within(buffer, PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE)
}

fn lanczos<P>(
    data: Vec<f32>,
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> Result<Vec<f32>, AppError>
where
    P: Pixel<Subpixel = f32> + 'static,
{
    let source: ImageBuffer<P, Vec<f32>> = ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| AppError::UnsupportedLayout("sample count mismatch".to_string()))?;
    let resized = imageops::resize(&source, new_width, new_height, FilterType::Lanczos3);
    // Lanczos rings past the input range
    Ok(resized.into_raw().into_iter().map(|v| v.clamp(0.0, 1.0)).collect())
}
