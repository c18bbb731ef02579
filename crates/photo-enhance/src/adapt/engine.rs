use crate::analysis::CharacteristicVector;
use crate::ops::OpKind;
use crate::presets::{PresetDefinition, PresetId, Step};

use super::params::{Param, ParamSet};

/// Noise sigma above which denoising may only grow and sharpening may only
/// shrink relative to the preset's base values.
pub const NOISE_HIGH: f32 = 0.025;

/// Sharpening is scaled by this when any denoise step ends at its maximum.
const SHARPEN_DAMPING: f32 = 0.5;

/// One step of the schedule with concrete values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStep {
    pub op: OpKind,
    pub params: ParamSet,
}

/// The concrete, clamped schedule for one image: one entry per preset step,
/// in step order.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveParameterSet {
    pub preset: PresetId,
    pub steps: Vec<PlannedStep>,
}

impl EffectiveParameterSet {
    /// First planned value of `param`, if the schedule has a step for its
    /// operation.
    pub fn first(&self, param: Param) -> Option<f32> {
        self.steps
            .iter()
            .find(|s| s.op == param.op())
            .map(|s| s.params.get(param))
    }
}

/// Combine a preset with an image's characteristics.
///
/// Pure and deterministic: the same inputs always produce the same set, and
/// every value lies within its parameter's range.
pub fn adapt(preset: &PresetDefinition, v: &CharacteristicVector) -> EffectiveParameterSet {
    let noisy = v.noise > NOISE_HIGH;

    let mut steps: Vec<PlannedStep> = preset
        .steps
        .iter()
        .map(|step| PlannedStep {
            op: step.op,
            params: resolve(step, v, noisy),
        })
        .collect();

    let denoise_max = Param::DenoiseStrength.spec().max;
    let denoise_maxed = steps
        .iter()
        .any(|s| s.op == OpKind::Denoise && s.params.get(Param::DenoiseStrength) >= denoise_max);
    if denoise_maxed {
        for step in steps.iter_mut().filter(|s| s.op == OpKind::Sharpen) {
            let amount = step.params.get(Param::SharpenAmount);
            step.params.set(Param::SharpenAmount, amount * SHARPEN_DAMPING);
        }
    }

    EffectiveParameterSet {
        preset: preset.id,
        steps,
    }
}

fn resolve(step: &Step, v: &CharacteristicVector, noisy: bool) -> ParamSet {
    let base = step.base_params();
    let mut params = base.clone();

    for (param, start) in base.for_op(step.op) {
        let mut value = start
            + step
                .rules
                .iter()
                .filter(|r| r.param == param)
                .map(|r| r.delta(v))
                .sum::<f32>();
        if !value.is_finite() {
            value = start;
        }
        if noisy {
            value = couple_to_noise(param, value, start);
        }
        params.set(param, value);
    }
    params
}

fn couple_to_noise(param: Param, value: f32, base: f32) -> f32 {
    match param {
        Param::DenoiseStrength | Param::SkinSoftenStrength => value.max(base),
        Param::SharpenAmount | Param::ClarityAmount => value.min(base),
        _ => value,
    }
}
