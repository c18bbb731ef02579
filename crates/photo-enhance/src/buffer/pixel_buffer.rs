use crate::api::EnhanceError;
use crate::color::Srgb;
use crate::parallel;

/// A decoded image: interleaved gamma-encoded samples in 0.0..=1.0.
///
/// Channel count is 3 (RGB) or 4 (RGBA). Operations edit the first three
/// channels of each pixel and carry alpha through untouched; every edit
/// preserves width, height and channel count.
///
/// ```
/// use photo_enhance::PixelBuffer;
///
/// let bytes = [255u8, 0, 0, 0, 255, 0];
/// let buffer = PixelBuffer::from_u8(2, 1, 3, &bytes).unwrap();
/// assert_eq!(buffer.pixel(1, 0), &[0.0, 1.0, 0.0]);
/// assert_eq!(buffer.to_u8(), bytes);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Wrap interleaved samples.
    ///
    /// Fails on an unsupported channel count or when `data` does not hold
    /// exactly `width * height * channels` samples. Zero-area buffers are
    /// representable (the analyzer accepts them) but rejected by
    /// [`validate`](Self::validate).
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, EnhanceError> {
        if channels != 3 && channels != 4 {
            return Err(EnhanceError::InvalidImage(format!(
                "unsupported channel count {channels} (expected 3 or 4)"
            )));
        }
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(EnhanceError::InvalidImage(format!(
                "expected {expected} samples for {width}x{height}x{channels}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A buffer with every sample (alpha included) set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        channels: usize,
        value: f32,
    ) -> Result<Self, EnhanceError> {
        let len = sample_count(width, height, channels)?;
        Self::new(width, height, channels, vec![value; len])
    }

    /// From 8-bit samples.
    pub fn from_u8(
        width: usize,
        height: usize,
        channels: usize,
        samples: &[u8],
    ) -> Result<Self, EnhanceError> {
        let data = samples.iter().map(|&v| v as f32 / 255.0).collect();
        Self::new(width, height, channels, data)
    }

    /// From 16-bit samples.
    pub fn from_u16(
        width: usize,
        height: usize,
        channels: usize,
        samples: &[u16],
    ) -> Result<Self, EnhanceError> {
        let data = samples.iter().map(|&v| v as f32 / 65535.0).collect();
        Self::new(width, height, channels, data)
    }

    /// Round and clamp to 8-bit samples.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    }

    /// Round and clamp to 16-bit samples.
    pub fn to_u16(&self) -> Vec<u16> {
        self.data
            .iter()
            .map(|&v| (v * 65535.0).round().clamp(0.0, 65535.0) as u16)
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Samples per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Samples of one row.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let len = self.row_len();
        &self.data[y * len..(y + 1) * len]
    }

    /// Samples of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// The color part of one pixel.
    #[inline]
    pub fn srgb(&self, x: usize, y: usize) -> Srgb {
        Srgb::from_pixel(self.pixel(x, y))
    }

    /// Reject buffers the pipeline cannot process: zero area or any
    /// non-finite sample.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.width == 0 || self.height == 0 {
            return Err(EnhanceError::InvalidImage(format!(
                "zero-area image ({}x{})",
                self.width, self.height
            )));
        }
        if let Some(index) = self.first_non_finite() {
            return Err(EnhanceError::InvalidImage(format!(
                "non-finite sample at index {index}"
            )));
        }
        Ok(())
    }

    /// Index of the first NaN or infinite sample, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// Clamp every sample into 0.0..=1.0.
    pub fn clamp_samples(&mut self) {
        for v in &mut self.data {
            *v = v.clamp(0.0, 1.0);
        }
    }

    /// Set alpha to fully opaque. No-op for RGB buffers.
    pub fn flatten_alpha(&mut self) {
        if self.channels == 4 {
            for pixel in self.data.chunks_exact_mut(4) {
                pixel[3] = 1.0;
            }
        }
    }

    /// Rec.601 luma per pixel, row-major.
    pub fn luma_plane(&self, parallel: bool) -> Vec<f32> {
        let mut plane = vec![0.0f32; self.pixel_count()];
        let channels = self.channels;
        parallel::for_each_row_mut(&mut plane, self.width, parallel, |y, out| {
            for (value, pixel) in out.iter_mut().zip(self.row(y).chunks_exact(channels)) {
                *value = Srgb::from_pixel(pixel).luma();
            }
        });
        plane
    }
}

fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize, EnhanceError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| EnhanceError::InvalidImage(format!("{width}x{height} overflows")))
}
