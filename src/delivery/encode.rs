use crate::error::AppError;
use crate::models::JpegQuality;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use photo_enhance::{CharacteristicVector, PixelBuffer};
use std::io::Cursor;

/// Sharpness above which an image counts as very detailed.
const VERY_DETAILED: f32 = 0.6;
/// Sharpness above which an image counts as detailed.
const DETAILED: f32 = 0.35;
/// Sharpness below which an image counts as smooth.
const SMOOTH: f32 = 0.15;
/// Mean HSV saturation above which an image counts as highly saturated.
const HIGHLY_SATURATED: f32 = 120.0 / 255.0;

/// Quality for preview JPEGs.
pub const PREVIEW_QUALITY: u8 = 85;

/// JPEG quality derived from an image's characteristics.
///
/// Fine texture and saturated color survive compression worse, so they get
/// more bits; smooth images get fewer.
pub fn auto_jpeg_quality(v: &CharacteristicVector) -> u8 {
    let mut quality: u8 = if v.sharpness > VERY_DETAILED {
        92
    } else if v.sharpness > DETAILED {
        90
    } else {
        88
    };
    if v.saturation > HIGHLY_SATURATED {
        quality = (quality + 2).min(95);
    }
    if v.sharpness < SMOOTH {
        quality = quality.saturating_sub(3).max(85);
    }
    quality
}

/// Resolve the configured quality for one image.
pub fn jpeg_quality(setting: JpegQuality, v: &CharacteristicVector) -> u8 {
    match setting {
        JpegQuality::Auto => auto_jpeg_quality(v),
        JpegQuality::Fixed(q) => q,
    }
}

/// Encode as baseline JPEG. Alpha, if present, is dropped.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, AppError> {
    let samples = buffer.to_u8();
    let rgb: Vec<u8> = if buffer.has_alpha() {
        samples.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect()
    } else {
        samples
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode(
        &rgb,
        buffer.width() as u32,
        buffer.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    tracing::debug!(quality, bytes = out.len(), "Encoded JPEG");
    Ok(out)
}

/// Encode as PNG at 8 or 16 bits per sample, optionally re-compressed with
/// oxipng.
pub fn encode_png(buffer: &PixelBuffer, bit_depth: u8, optimize: bool) -> Result<Vec<u8>, AppError> {
    let color_type = if buffer.has_alpha() {
        png::ColorType::Rgba
    } else {
        png::ColorType::Rgb
    };
    let (depth, samples) = if bit_depth > 8 {
        // PNG stores 16-bit samples big-endian
        let bytes: Vec<u8> = buffer.to_u16().iter().flat_map(|v| v.to_be_bytes()).collect();
        (png::BitDepth::Sixteen, bytes)
    } else {
        (png::BitDepth::Eight, buffer.to_u8())
    };

    let png_bytes = write_png(
        buffer.width() as u32,
        buffer.height() as u32,
        color_type,
        depth,
        &samples,
    )?;
    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before = png_bytes.len(), after = optimized.len(), "Optimized PNG");
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Encode pixel rows as a PNG (fast settings, oxipng re-compresses).
fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    samples: &[u8],
) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::Encode(e.to_string()))?;
        writer
            .write_image_data(samples)
            .map_err(|e| AppError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
