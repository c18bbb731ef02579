//! Assertion helpers for tests.

use image::{DynamicImage, GenericImageView};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes are a decodable JPEG and return the decoded image
pub fn assert_jpeg(bytes: &[u8]) -> DynamicImage {
    assert!(
        bytes.starts_with(&[0xFF, 0xD8]),
        "Expected JPEG, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..4.min(bytes.len())]
    );
    image::load_from_memory(bytes).expect("JPEG should decode")
}

/// Assert bytes are a decodable PNG and return the decoded image
pub fn assert_png(bytes: &[u8]) -> DynamicImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    image::load_from_memory(bytes).expect("PNG should decode")
}

/// Assert decoded dimensions
pub fn assert_dimensions(image: &DynamicImage, width: u32, height: u32) {
    assert_eq!(
        image.dimensions(),
        (width, height),
        "Unexpected output dimensions"
    );
}

/// Mean of all color samples, 0.0..=1.0
pub fn mean_level(image: &DynamicImage) -> f32 {
    let rgb = image.to_rgb8();
    let sum: u64 = rgb.as_raw().iter().map(|&v| v as u64).sum();
    sum as f32 / (rgb.as_raw().len() as f32 * 255.0)
}
