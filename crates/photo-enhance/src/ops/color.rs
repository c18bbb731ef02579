//! Color operations: white balance, saturation family, split toning,
//! channel restoration and monochrome conversion.

use std::f32::consts::PI;

use crate::adapt::{Param, ParamSet};
use crate::api::EnhanceError;
use crate::buffer::PixelBuffer;
use crate::color::{is_skin, Hsv, Oklab, Oklch, Srgb, LUMA_WEIGHTS};

use super::{channel_means, map_pixels, ExecContext};

/// Channel means below this are treated as absent for gain computation.
const MEAN_FLOOR: f64 = 1e-4;
const GAIN_RANGE: (f32, f32) = (0.5, 2.0);

/// Oklch chroma at which selective color reaches full weight; greys below
/// it are left (nearly) alone.
const SELECTIVE_CHROMA_RAMP: f32 = 0.04;
/// Chroma below which a pixel counts as neutral and has no usable hue.
const NEUTRAL_CHROMA: f32 = 2e-3;

/// Lightness above which the saturation shadow term fades out.
const SATURATION_SHADOW_PIVOT: f32 = 0.5;

/// Largest relative red boost channel restoration applies at full strength.
const MAX_RED_BOOST: f32 = 1.5;

fn scale_channels(buffer: &mut PixelBuffer, ctx: &ExecContext, gains: [f32; 3]) {
    map_pixels(buffer, ctx, |c| {
        Srgb::new(c.r * gains[0], c.g * gains[1], c.b * gains[2])
    });
}

/// Gray-world neutralization plus temperature and tint shifts.
///
/// Gains are normalized so a mid-gray pixel keeps its Rec.601 luma.
pub(crate) fn white_balance(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let neutralize = params.get(Param::WbNeutralize);
    let temperature = params.get(Param::WbTemperature);
    let tint = params.get(Param::WbTint);
    if neutralize == 0.0 && temperature == 0.0 && tint == 0.0 {
        return;
    }

    let mut gains = [1.0f32; 3];
    if neutralize > 0.0 {
        let means = channel_means(buffer, ctx);
        if means.iter().all(|&m| m > MEAN_FLOOR) {
            let gray = means.iter().sum::<f64>() / 3.0;
            for (g, m) in gains.iter_mut().zip(means) {
                *g = ((gray / m) as f32).powf(neutralize);
            }
        }
    }
    gains[0] *= 1.0 + temperature;
    gains[2] *= 1.0 - temperature;
    gains[1] *= 1.0 - tint;

    let gains = gains.map(|g| g.clamp(GAIN_RANGE.0, GAIN_RANGE.1));
    let weighted: f32 = gains.iter().zip(LUMA_WEIGHTS).map(|(g, w)| g * w).sum();
    let gains = gains.map(|g| g / weighted);
    tracing::trace!(?gains, "white balance");
    scale_channels(buffer, ctx, gains);
}

/// Oklch chroma scale, with an extra term weighted toward the shadows.
pub(crate) fn saturation(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let scale = params.get(Param::SaturationScale);
    let shadows = params.get(Param::SaturationShadows);
    if scale == 1.0 && shadows == 0.0 {
        return;
    }
    map_pixels(buffer, ctx, |c| {
        let lch = Oklch::from(Oklab::from_srgb(c));
        let shadow_weight = (1.0 - lch.l / SATURATION_SHADOW_PIVOT).clamp(0.0, 1.0);
        let factor = (scale + shadows * shadow_weight).max(0.0);
        Oklab::from(lch.scale_chroma(factor)).to_srgb()
    });
}

/// Saturation boost that favors muted colors and goes easy on skin.
pub(crate) fn vibrance(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let amount = params.get(Param::VibranceAmount);
    if amount == 0.0 {
        return;
    }
    map_pixels(buffer, ctx, |c| {
        let s = Hsv::from(c).s;
        let mut weight = 1.0 - s;
        if is_skin(c) {
            weight *= 0.5;
        }
        let lch = Oklch::from(Oklab::from_srgb(c));
        Oklab::from(lch.scale_chroma(1.0 + amount * weight)).to_srgb()
    });
}

/// Angular distance between two hues in degrees, 0.0..=180.0.
#[inline]
fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Hue rotation and chroma scaling inside a raised-cosine band around
/// `selective.hue`.
pub(crate) fn selective_color(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let hue = params.get(Param::SelectiveHue);
    let width = params.get(Param::SelectiveWidth);
    let shift = params.get(Param::SelectiveShift);
    let sat = params.get(Param::SelectiveSaturation);
    if shift == 0.0 && sat == 0.0 {
        return;
    }
    map_pixels(buffer, ctx, |c| {
        let lch = Oklch::from(Oklab::from_srgb(c));
        if lch.c < NEUTRAL_CHROMA {
            return c;
        }
        let d = hue_distance(lch.hue_degrees(), hue);
        if d >= width {
            return c;
        }
        let w = 0.5 * (1.0 + (PI * d / width).cos()) * (lch.c / SELECTIVE_CHROMA_RAMP).min(1.0);
        if w <= 0.0 {
            return c;
        }
        Oklab::from(lch.rotate_hue(shift * w).scale_chroma(1.0 + sat * w)).to_srgb()
    });
}

/// Tint shadows and highlights by offsetting Oklab a/b.
pub(crate) fn split_tone(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let shadow = (params.get(Param::SplitShadowA), params.get(Param::SplitShadowB));
    let highlight = (
        params.get(Param::SplitHighlightA),
        params.get(Param::SplitHighlightB),
    );
    if shadow == (0.0, 0.0) && highlight == (0.0, 0.0) {
        return;
    }
    map_pixels(buffer, ctx, |c| {
        let lab = Oklab::from_srgb(c);
        let s = (1.0 - lab.l / 0.6).clamp(0.0, 1.0);
        let h = ((lab.l - 0.5) / 0.5).clamp(0.0, 1.0);
        Oklab::new(
            lab.l,
            lab.a + s * shadow.0 + h * highlight.0,
            lab.b + s * shadow.1 + h * highlight.1,
        )
        .to_srgb()
    });
}

/// Put back red that water or filtering absorbed, judged from the image's
/// cast, and optionally trim blue.
pub(crate) fn channel_restore(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let red = params.get(Param::RestoreRed);
    let blue_cut = params.get(Param::RestoreBlueCut);
    if red == 0.0 && blue_cut == 0.0 {
        return;
    }
    let mut red_gain = 1.0;
    if red > 0.0 {
        let [r, g, b] = channel_means(buffer, ctx);
        let target = (g + b) / 2.0;
        if r < target {
            let boost = (target / r.max(MEAN_FLOOR) - 1.0) as f32;
            red_gain += red * boost.min(MAX_RED_BOOST);
        }
    }
    if red_gain == 1.0 && blue_cut == 0.0 {
        return;
    }
    tracing::trace!(red_gain, blue_cut, "channel restore");
    scale_channels(buffer, ctx, [red_gain, 1.0, 1.0 - blue_cut]);
}

/// Weighted channel mix written to all three channels.
pub(crate) fn monochrome(
    buffer: &mut PixelBuffer,
    params: &ParamSet,
    ctx: &ExecContext,
) -> Result<(), EnhanceError> {
    let weights = [
        params.get(Param::MonoRed),
        params.get(Param::MonoGreen),
        params.get(Param::MonoBlue),
    ];
    let sum: f32 = weights.iter().sum();
    if sum <= 1e-6 {
        return Err(EnhanceError::OperationFailure {
            operation: "monochrome",
            detail: "channel weights sum to zero".into(),
        });
    }
    let [wr, wg, wb] = weights.map(|w| w / sum);
    map_pixels(buffer, ctx, |c| {
        let y = wr * c.r + wg * c.g + wb * c.b;
        Srgb::new(y, y, y)
    });
    Ok(())
}
