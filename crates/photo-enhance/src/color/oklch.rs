//! Oklch: the polar form of Oklab.
//!
//! Saturation changes scale chroma and hue changes rotate the angle; both
//! leave lightness alone, which is why the saturation family of operations
//! works here rather than in HSV.

use super::oklab::Oklab;

/// Lightness, chroma and hue (radians, `atan2(b, a)`).
///
/// For achromatic colors the hue is 0.0, which is harmless because any chroma
/// scaling of zero chroma stays zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    /// Multiply chroma, never going negative.
    #[inline]
    pub fn scale_chroma(self, factor: f32) -> Self {
        Self {
            c: (self.c * factor).max(0.0),
            ..self
        }
    }

    /// Rotate the hue by `degrees`.
    #[inline]
    pub fn rotate_hue(self, degrees: f32) -> Self {
        Self {
            h: self.h + degrees.to_radians(),
            ..self
        }
    }

    /// Hue in degrees, normalized to 0.0..360.0.
    #[inline]
    pub fn hue_degrees(self) -> f32 {
        self.h.to_degrees().rem_euclid(360.0)
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        Self {
            l: lab.l,
            c: lab.chroma(),
            h: lab.b.atan2(lab.a),
        }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        Self::new(lch.l, lch.c * lch.h.cos(), lch.c * lch.h.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_round_trip() {
        for original in [
            Oklab::new(0.5, 0.1, 0.0),
            Oklab::new(0.5, -0.1, -0.1),
            Oklab::new(0.8, 0.05, 0.02),
            Oklab::new(0.2, -0.02, 0.05),
        ] {
            let back = Oklab::from(Oklch::from(original));
            assert!(approx_eq(original.l, back.l, 1e-6));
            assert!(approx_eq(original.a, back.a, 1e-6));
            assert!(approx_eq(original.b, back.b, 1e-6));
        }
    }

    #[test]
    fn test_achromatic_has_no_nan() {
        let lch = Oklch::from(Oklab::new(0.5, 0.0, 0.0));
        assert!(!lch.h.is_nan());
        assert_eq!(lch.c, 0.0);
        assert_eq!(lch.scale_chroma(3.0).c, 0.0);
    }

    #[test]
    fn test_scale_chroma_preserves_hue_and_lightness() {
        let lch = Oklch::from(Oklab::new(0.6, 0.1, 0.15));
        let boosted = lch.scale_chroma(1.5);
        assert_eq!(boosted.l, lch.l);
        assert_eq!(boosted.h, lch.h);
        assert!(approx_eq(boosted.c, lch.c * 1.5, 1e-6));
        assert_eq!(lch.scale_chroma(-1.0).c, 0.0);
    }

    #[test]
    fn test_hue_degrees_wraps() {
        let blue = Oklch::from(Oklab::new(0.5, 0.0, -0.1));
        assert!(approx_eq(blue.hue_degrees(), 270.0, 1e-3));
        let rotated = blue.rotate_hue(100.0);
        assert!(approx_eq(rotated.hue_degrees(), 10.0, 1e-3));
    }
}
