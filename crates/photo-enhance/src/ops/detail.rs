//! Noise reduction, skin smoothing and unsharp-mask sharpening.

use crate::adapt::{Param, ParamSet};
use crate::buffer::PixelBuffer;
use crate::color::{is_skin, Srgb};
use crate::parallel;

use super::blur::blur_plane;
use super::ExecContext;

/// Bilateral window is (2 * RADIUS + 1) squared.
const BILATERAL_RADIUS: usize = 2;
const SPATIAL_SIGMA: f32 = 1.5;

/// Blur applied to the binary skin mask so smoothing fades in at its edges.
const SKIN_MASK_SIGMA: f32 = 2.0;

fn spatial_weights() -> [[f32; 2 * BILATERAL_RADIUS + 1]; 2 * BILATERAL_RADIUS + 1] {
    let mut weights = [[0.0; 2 * BILATERAL_RADIUS + 1]; 2 * BILATERAL_RADIUS + 1];
    for (dy, row) in weights.iter_mut().enumerate() {
        for (dx, w) in row.iter_mut().enumerate() {
            let ddx = dx as f32 - BILATERAL_RADIUS as f32;
            let ddy = dy as f32 - BILATERAL_RADIUS as f32;
            *w = (-(ddx * ddx + ddy * ddy) / (2.0 * SPATIAL_SIGMA * SPATIAL_SIGMA)).exp();
        }
    }
    weights
}

/// Edge-preserving smoothing. Each pixel is replaced by a mix of itself and
/// its bilateral average, the mix given by `blend(x, y)`.
fn bilateral<B>(buffer: &mut PixelBuffer, ctx: &ExecContext, sigma_range: f32, blend: B)
where
    B: Fn(usize, usize) -> f32 + Sync,
{
    let src = buffer.clone();
    let (width, height, channels) = (src.width(), src.height(), src.channels());
    let spatial = spatial_weights();
    let range_denominator = 2.0 * sigma_range * sigma_range;
    let row_len = buffer.row_len();

    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |y, row| {
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let mix = blend(x, y).clamp(0.0, 1.0);
            if mix <= 0.0 {
                continue;
            }
            let center = src.srgb(x, y);
            let (mut sum, mut total) = ([0.0f32; 3], 0.0f32);

            let y0 = y.saturating_sub(BILATERAL_RADIUS);
            let y1 = (y + BILATERAL_RADIUS).min(height - 1);
            let x0 = x.saturating_sub(BILATERAL_RADIUS);
            let x1 = (x + BILATERAL_RADIUS).min(width - 1);
            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    let n = src.srgb(nx, ny);
                    let (dr, dg, db) = (n.r - center.r, n.g - center.g, n.b - center.b);
                    let w = spatial[ny + BILATERAL_RADIUS - y][nx + BILATERAL_RADIUS - x]
                        * (-(dr * dr + dg * dg + db * db) / range_denominator).exp();
                    sum[0] += w * n.r;
                    sum[1] += w * n.g;
                    sum[2] += w * n.b;
                    total += w;
                }
            }

            let smoothed = Srgb::new(sum[0] / total, sum[1] / total, sum[2] / total);
            Srgb::new(
                center.r + mix * (smoothed.r - center.r),
                center.g + mix * (smoothed.g - center.g),
                center.b + mix * (smoothed.b - center.b),
            )
            .write_to(pixel);
        }
    });
}

pub(crate) fn denoise(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let strength = params.get(Param::DenoiseStrength);
    if strength <= 0.0 {
        return;
    }
    bilateral(buffer, ctx, 0.03 + 0.15 * strength, |_, _| strength);
}

pub(crate) fn skin_soften(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let strength = params.get(Param::SkinSoftenStrength);
    if strength <= 0.0 {
        return;
    }
    let (width, height) = (buffer.width(), buffer.height());
    let mut mask = vec![0.0f32; width * height];
    parallel::for_each_row_mut(&mut mask, width, ctx.parallel, |y, row| {
        for (x, m) in row.iter_mut().enumerate() {
            *m = if is_skin(buffer.srgb(x, y)) { 1.0 } else { 0.0 };
        }
    });
    if mask.iter().all(|&m| m == 0.0) {
        return;
    }
    let mask = blur_plane(&mask, width, height, SKIN_MASK_SIGMA, ctx.parallel);
    bilateral(buffer, ctx, 0.05 + 0.1 * strength, |x, y| {
        strength * mask[y * width + x]
    });
}

/// Add `amount` times the luma detail (luma minus its blur) to every channel.
///
/// Detail smaller than `threshold` is ignored and larger detail is reduced
/// by it, so grain below the threshold is not amplified. With `midtones`
/// the boost fades toward black and white to avoid clipping.
fn unsharp_luma(
    buffer: &mut PixelBuffer,
    ctx: &ExecContext,
    sigma: f32,
    amount: f32,
    threshold: f32,
    midtones: bool,
) {
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    let luma = buffer.luma_plane(ctx.parallel);
    let blurred = blur_plane(&luma, width, height, sigma, ctx.parallel);
    let row_len = buffer.row_len();

    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |y, row| {
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let i = y * width + x;
            let detail = luma[i] - blurred[i];
            let detail = detail.signum() * (detail.abs() - threshold).max(0.0);
            let mut delta = amount * detail;
            if midtones {
                let centered = 2.0 * luma[i] - 1.0;
                delta *= 1.0 - centered * centered;
            }
            if delta != 0.0 {
                Srgb::from_pixel(pixel).offset(delta).write_to(pixel);
            }
        }
    });
}

pub(crate) fn sharpen(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let amount = params.get(Param::SharpenAmount);
    if amount <= 0.0 {
        return;
    }
    unsharp_luma(
        buffer,
        ctx,
        params.get(Param::SharpenRadius),
        amount,
        params.get(Param::SharpenThreshold),
        false,
    );
}

pub(crate) fn clarity(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let amount = params.get(Param::ClarityAmount);
    if amount <= 0.0 {
        return;
    }
    unsharp_luma(buffer, ctx, params.get(Param::ClarityRadius), amount, 0.0, true);
}
