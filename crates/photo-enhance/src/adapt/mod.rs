//! Adaptation: preset base values plus characteristic-driven deltas.
//!
//! Per parameter the engine computes `base + sum(rule deltas)`, falls back to
//! the base when that is not finite, applies the noise coupling guard and
//! finally clamps into the declared range. Rules are data on the preset
//! steps; the engine has no per-preset code.

mod engine;
mod params;
mod rules;

pub use engine::{adapt, EffectiveParameterSet, PlannedStep, NOISE_HIGH};
pub use params::{Param, ParamSet, ParamSpec};
pub use rules::{Curve, Rule};
