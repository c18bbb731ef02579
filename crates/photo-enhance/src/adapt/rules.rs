//! Adaptation rules: how one characteristic nudges one parameter.

use crate::analysis::{Characteristic, CharacteristicVector};

use super::params::Param;

/// Maps a characteristic value to an additive parameter delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// `slope * (x - pivot)`, signed on both sides of the pivot
    Linear { pivot: f32, slope: f32 },
    /// `slope * (x - threshold)` once `x` rises above `threshold`, else 0
    Above { threshold: f32, slope: f32 },
    /// `slope * (threshold - x)` once `x` falls below `threshold`, else 0.
    /// A positive slope raises the parameter as the input drops.
    Below { threshold: f32, slope: f32 },
}

impl Curve {
    pub fn delta(self, x: f32) -> f32 {
        match self {
            Curve::Linear { pivot, slope } => slope * (x - pivot),
            Curve::Above { threshold, slope } => slope * (x - threshold).max(0.0),
            Curve::Below { threshold, slope } => slope * (threshold - x).max(0.0),
        }
    }
}

/// `param += curve(input)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub param: Param,
    pub input: Characteristic,
    pub curve: Curve,
}

impl Rule {
    pub const fn new(param: Param, input: Characteristic, curve: Curve) -> Self {
        Self {
            param,
            input,
            curve,
        }
    }

    pub fn delta(&self, v: &CharacteristicVector) -> f32 {
        self.curve.delta(self.input.read(v))
    }
}
