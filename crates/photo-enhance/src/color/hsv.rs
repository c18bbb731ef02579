//! HSV view of an sRGB pixel.
//!
//! Only used for classification (hue bands, skin tones, vibrance weighting);
//! nothing is ever written back through HSV.

use super::srgb::Srgb;

/// Hue in degrees (0.0..360.0), saturation and value in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl From<Srgb> for Hsv {
    fn from(rgb: Srgb) -> Self {
        let max = rgb.r.max(rgb.g).max(rgb.b);
        let min = rgb.r.min(rgb.g).min(rgb.b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == rgb.r {
            60.0 * ((rgb.g - rgb.b) / delta)
        } else if max == rgb.g {
            60.0 * ((rgb.b - rgb.r) / delta + 2.0)
        } else {
            60.0 * ((rgb.r - rgb.g) / delta + 4.0)
        };

        Self {
            h: h.rem_euclid(360.0),
            s,
            v: max,
        }
    }
}

/// Skin-tone test combining an HSV window with a YCrCb window.
///
/// Both windows must agree, which keeps orange foliage and sunsets out of
/// the mask while accepting a wide range of complexions.
pub fn is_skin(rgb: Srgb) -> bool {
    let hsv = Hsv::from(rgb);
    let hsv_match = hsv.h <= 50.0 && (0.078..=0.706).contains(&hsv.s) && hsv.v >= 0.275;
    if !hsv_match {
        return false;
    }

    let y = rgb.luma();
    let cr = (rgb.r - y) * 0.713 + 0.5;
    let cb = (rgb.b - y) * 0.564 + 0.5;
    (133.0 / 255.0..=173.0 / 255.0).contains(&cr) && (77.0 / 255.0..=127.0 / 255.0).contains(&cb)
}
