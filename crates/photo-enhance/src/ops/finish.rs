//! Finishing effects applied last: vignette and film grain.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adapt::{Param, ParamSet};
use crate::buffer::PixelBuffer;
use crate::color::Srgb;
use crate::parallel;

use super::ExecContext;

/// Base seed for grain; each row derives its own stream from it.
const GRAIN_SEED: u64 = 0x5EED_6A1E_0F11_0A75;

pub(crate) fn vignette(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let strength = params.get(Param::VignetteStrength);
    if strength <= 0.0 {
        return;
    }
    let radius = params.get(Param::VignetteRadius);
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let half_diagonal = (cx * cx + cy * cy).sqrt();
    if half_diagonal <= 0.0 {
        return;
    }
    let row_len = buffer.row_len();

    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |y, row| {
        let dy = y as f32 - cy;
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let dx = x as f32 - cx;
            let d = (dx * dx + dy * dy).sqrt() / half_diagonal / radius;
            let factor = 1.0 - strength * (d * d).min(1.0);
            let c = Srgb::from_pixel(pixel);
            Srgb::new(c.r * factor, c.g * factor, c.b * factor).write_to(pixel);
        }
    });
}

#[inline]
fn row_rng(y: usize) -> StdRng {
    StdRng::seed_from_u64(GRAIN_SEED ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Standard normal sample (Box-Muller).
#[inline]
fn gaussian(rng: &mut StdRng) -> f32 {
    let u1 = 1.0 - rng.gen::<f32>();
    let u2 = rng.gen::<f32>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

/// Luminance grain. The noise of a row depends only on its index, so the
/// result is the same however rows are scheduled.
pub(crate) fn grain(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let amount = params.get(Param::GrainAmount);
    if amount <= 0.0 {
        return;
    }
    let channels = buffer.channels();
    let row_len = buffer.row_len();
    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |y, row| {
        let mut rng = row_rng(y);
        for pixel in row.chunks_exact_mut(channels) {
            let n = gaussian(&mut rng);
            Srgb::from_pixel(pixel).offset(amount * n).write_to(pixel);
        }
    });
}
