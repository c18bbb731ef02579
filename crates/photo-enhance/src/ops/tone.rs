//! Global tone: exposure, tone curve, shadow and highlight recovery.

use crate::adapt::{Param, ParamSet};
use crate::buffer::PixelBuffer;
use crate::color::{Oklab, Srgb};

use super::{map_pixels, mean_luma, ExecContext};

/// Mean luma is clamped into this range before the exposure exponent is
/// derived, so black or white frames do not produce extreme gammas.
const MEAN_LUMA_RANGE: (f64, f64) = (0.02, 0.98);
/// Bounds on the full-strength exposure exponent.
const EXPONENT_RANGE: (f32, f32) = (0.4, 2.5);

/// Lightness below which the shadows control acts.
const SHADOW_PIVOT: f32 = 0.45;
/// Lightness above which the highlights control acts.
const HIGHLIGHT_PIVOT: f32 = 0.70;

/// S-curve steepness for positive contrast.
const S_CURVE_GAIN: f32 = 3.5;

/// Move mean luma toward `exposure.target` with a per-channel power curve.
///
/// A full-strength exponent maps the current mean exactly onto the target;
/// `exposure.strength` scales it in log space. Black and white stay fixed.
pub(crate) fn exposure(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let strength = params.get(Param::ExposureStrength);
    if strength <= 0.0 {
        return;
    }
    let target = params.get(Param::ExposureTarget) as f64;
    let mean = mean_luma(buffer, ctx).clamp(MEAN_LUMA_RANGE.0, MEAN_LUMA_RANGE.1);
    let full = (target.ln() / mean.ln()) as f32;
    let exponent = full.clamp(EXPONENT_RANGE.0, EXPONENT_RANGE.1).powf(strength);
    if exponent == 1.0 {
        return;
    }
    tracing::trace!(mean, exponent, "exposure");
    map_pixels(buffer, ctx, |c| {
        Srgb::new(
            c.r.max(0.0).powf(exponent),
            c.g.max(0.0).powf(exponent),
            c.b.max(0.0).powf(exponent),
        )
    });
}

fn curve_value(x: f32, black: f32, white: f32, fade: f32, contrast: f32) -> f32 {
    let t = ((x - black) / (white - black).max(1e-3)).clamp(0.0, 1.0);
    let t = if contrast > 0.0 {
        let s = 0.5 + 0.5 * (S_CURVE_GAIN * (t - 0.5)).tanh() / (S_CURVE_GAIN * 0.5).tanh();
        t + contrast * (s - t)
    } else {
        0.5 + (t - 0.5) * (1.0 + contrast)
    };
    fade + t * (1.0 - fade)
}

/// Black and white points, a contrast S-curve (or flattening when negative)
/// and a faded black floor, applied to each channel.
pub(crate) fn tone_curve(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let black = params.get(Param::ToneBlack);
    let white = params.get(Param::ToneWhite);
    let fade = params.get(Param::ToneFade);
    let contrast = params.get(Param::ToneContrast);
    if black == 0.0 && white == 1.0 && fade == 0.0 && contrast == 0.0 {
        return;
    }
    let f = |x| curve_value(x, black, white, fade, contrast);
    map_pixels(buffer, ctx, |c| Srgb::new(f(c.r), f(c.g), f(c.b)));
}

/// Lift (positive) or crush (negative) shadows and recover (negative) or
/// brighten (positive) highlights on Oklab lightness. Chroma coordinates are
/// kept, so hue does not move.
pub(crate) fn shadows_highlights(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let shadows = params.get(Param::Shadows);
    let highlights = params.get(Param::Highlights);
    if shadows == 0.0 && highlights == 0.0 {
        return;
    }
    let shadow_gamma = 1.0 / (1.0 + 2.0 * shadows);
    let highlight_gamma = 1.0 / (1.0 + 2.0 * highlights);

    map_pixels(buffer, ctx, |c| {
        let lab = Oklab::from_srgb(c);
        let l = lab.l.clamp(0.0, 1.0);
        let mapped = if shadows != 0.0 && l < SHADOW_PIVOT {
            SHADOW_PIVOT * (l / SHADOW_PIVOT).powf(shadow_gamma)
        } else if highlights != 0.0 && l > HIGHLIGHT_PIVOT {
            let t = (l - HIGHLIGHT_PIVOT) / (1.0 - HIGHLIGHT_PIVOT);
            HIGHLIGHT_PIVOT + (1.0 - HIGHLIGHT_PIVOT) * t.powf(highlight_gamma)
        } else {
            return c;
        };
        Oklab::new(mapped, lab.a, lab.b).to_srgb()
    });
}
