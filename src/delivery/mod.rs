//! Getting pixels in and out: decoding, delivery resizing, encoding.

pub mod decode;
pub mod encode;
pub mod resize;

pub use decode::{decode_bytes, decode_file, from_dynamic, DecodedImage};
pub use encode::{auto_jpeg_quality, encode_jpeg, encode_png, jpeg_quality, PREVIEW_QUALITY};
pub use resize::{fit_dimensions, fit_within, preview, PREVIEW_MAX_SIDE};
