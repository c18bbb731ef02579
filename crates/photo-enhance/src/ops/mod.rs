//! Operation library.
//!
//! Stateless transforms that edit a [`PixelBuffer`] in place. Each reads only
//! its own parameters (see [`OpKind::params`]) plus the buffer, preserves
//! dimensions and channel count, clamps what it writes into 0.0..=1.0 and
//! leaves alpha alone. Operations that need a whole-image statistic
//! (exposure, white balance, channel restoration) reduce it in row order so
//! parallel and serial runs agree bit for bit.

mod blur;
mod clahe;
mod color;
mod detail;
mod finish;
mod tone;

use std::fmt;

use crate::adapt::{Param, ParamSet};
use crate::api::EnhanceError;
use crate::buffer::PixelBuffer;
use crate::color::Srgb;
use crate::parallel;

/// Execution settings shared by all operations of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecContext {
    /// Allow row-parallel execution on large buffers.
    pub parallel: bool,
}

/// The operations a preset step can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Denoise,
    SkinSoften,
    WhiteBalance,
    Exposure,
    ToneCurve,
    ShadowsHighlights,
    LocalContrast,
    Clarity,
    Saturation,
    Vibrance,
    SelectiveColor,
    SplitTone,
    ChannelRestore,
    Monochrome,
    Sharpen,
    Vignette,
    Grain,
}

impl OpKind {
    pub const ALL: [OpKind; 17] = [
        OpKind::Denoise,
        OpKind::SkinSoften,
        OpKind::WhiteBalance,
        OpKind::Exposure,
        OpKind::ToneCurve,
        OpKind::ShadowsHighlights,
        OpKind::LocalContrast,
        OpKind::Clarity,
        OpKind::Saturation,
        OpKind::Vibrance,
        OpKind::SelectiveColor,
        OpKind::SplitTone,
        OpKind::ChannelRestore,
        OpKind::Monochrome,
        OpKind::Sharpen,
        OpKind::Vignette,
        OpKind::Grain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OpKind::Denoise => "denoise",
            OpKind::SkinSoften => "skin_soften",
            OpKind::WhiteBalance => "white_balance",
            OpKind::Exposure => "exposure",
            OpKind::ToneCurve => "tone_curve",
            OpKind::ShadowsHighlights => "shadows_highlights",
            OpKind::LocalContrast => "local_contrast",
            OpKind::Clarity => "clarity",
            OpKind::Saturation => "saturation",
            OpKind::Vibrance => "vibrance",
            OpKind::SelectiveColor => "selective_color",
            OpKind::SplitTone => "split_tone",
            OpKind::ChannelRestore => "channel_restore",
            OpKind::Monochrome => "monochrome",
            OpKind::Sharpen => "sharpen",
            OpKind::Vignette => "vignette",
            OpKind::Grain => "grain",
        }
    }

    /// The declared parameter schema of this operation.
    pub fn params(self) -> impl Iterator<Item = Param> {
        Param::ALL.iter().copied().filter(move |p| p.op() == self)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply one operation to `buffer` in place.
pub fn apply(
    op: OpKind,
    buffer: &mut PixelBuffer,
    params: &ParamSet,
    ctx: &ExecContext,
) -> Result<(), EnhanceError> {
    if buffer.is_empty() {
        return Ok(());
    }
    match op {
        OpKind::Denoise => detail::denoise(buffer, params, ctx),
        OpKind::SkinSoften => detail::skin_soften(buffer, params, ctx),
        OpKind::WhiteBalance => color::white_balance(buffer, params, ctx),
        OpKind::Exposure => tone::exposure(buffer, params, ctx),
        OpKind::ToneCurve => tone::tone_curve(buffer, params, ctx),
        OpKind::ShadowsHighlights => tone::shadows_highlights(buffer, params, ctx),
        OpKind::LocalContrast => clahe::local_contrast(buffer, params, ctx),
        OpKind::Clarity => detail::clarity(buffer, params, ctx),
        OpKind::Saturation => color::saturation(buffer, params, ctx),
        OpKind::Vibrance => color::vibrance(buffer, params, ctx),
        OpKind::SelectiveColor => color::selective_color(buffer, params, ctx),
        OpKind::SplitTone => color::split_tone(buffer, params, ctx),
        OpKind::ChannelRestore => color::channel_restore(buffer, params, ctx),
        OpKind::Monochrome => return color::monochrome(buffer, params, ctx),
        OpKind::Sharpen => detail::sharpen(buffer, params, ctx),
        OpKind::Vignette => finish::vignette(buffer, params, ctx),
        OpKind::Grain => finish::grain(buffer, params, ctx),
    }
    Ok(())
}

/// Replace the color of every pixel with `f(color)`.
pub(crate) fn map_pixels<F>(buffer: &mut PixelBuffer, ctx: &ExecContext, f: F)
where
    F: Fn(Srgb) -> Srgb + Sync,
{
    let channels = buffer.channels();
    let row_len = buffer.row_len();
    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |_, row| {
        for pixel in row.chunks_exact_mut(channels) {
            f(Srgb::from_pixel(pixel)).write_to(pixel);
        }
    });
}

/// Per-channel means, reduced in row order.
pub(crate) fn channel_means(buffer: &PixelBuffer, ctx: &ExecContext) -> [f64; 3] {
    let channels = buffer.channels();
    let bands = parallel::map_bands(buffer.height(), buffer.row_len(), ctx.parallel, |rows| {
        let mut sums = [0.0f64; 3];
        for y in rows {
            for pixel in buffer.row(y).chunks_exact(channels) {
                sums[0] += pixel[0] as f64;
                sums[1] += pixel[1] as f64;
                sums[2] += pixel[2] as f64;
            }
        }
        sums
    });
    let mut total = [0.0f64; 3];
    for band in bands {
        for (t, s) in total.iter_mut().zip(band) {
            *t += s;
        }
    }
    let n = buffer.pixel_count().max(1) as f64;
    total.map(|s| s / n)
}

/// Mean Rec.601 luma, reduced in row order.
pub(crate) fn mean_luma(buffer: &PixelBuffer, ctx: &ExecContext) -> f64 {
    let [r, g, b] = channel_means(buffer, ctx);
    let w = crate::color::LUMA_WEIGHTS;
    w[0] as f64 * r + w[1] as f64 * g + w[2] as f64 * b
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Smooth RGB gradient with some color in it.
    pub fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let fx = x as f32 / (width.max(2) - 1) as f32;
                let fy = y as f32 / (height.max(2) - 1) as f32;
                data.extend_from_slice(&[fx, 0.3 + 0.4 * fy, 1.0 - fx * 0.8]);
            }
        }
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    pub fn max_abs_diff(a: &PixelBuffer, b: &PixelBuffer) -> f32 {
        a.data()
            .iter()
            .zip(b.data())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max)
    }

    pub fn in_range(buffer: &PixelBuffer) -> bool {
        buffer.data().iter().all(|v| (0.0..=1.0).contains(v))
    }
}
