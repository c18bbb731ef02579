//! Enhancement presets.
//!
//! Each preset is a static [`PresetDefinition`]: an ordered list of
//! [`Step`]s, each naming one operation, the base values it overrides and the
//! rules that adapt them to the image. All presets run through the same
//! engine; adding a preset means adding data to [`definitions`].

mod definitions;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::adapt::{Param, ParamSet, Rule};
use crate::api::EnhanceError;
use crate::ops::OpKind;

/// The fixed set of enhancement styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresetId {
    Portrait,
    Pets,
    Food,
    Landscape,
    Architecture,
    City,
    Ocean,
    Underwater,
    Jungle,
    Snow,
    Indoor,
    #[default]
    Standard,
    Sunset,
    Night,
    Bright,
    Cinematic,
    Retro,
    BlackAndWhite,
}

impl PresetId {
    pub const ALL: [PresetId; 18] = [
        PresetId::Portrait,
        PresetId::Pets,
        PresetId::Food,
        PresetId::Landscape,
        PresetId::Architecture,
        PresetId::City,
        PresetId::Ocean,
        PresetId::Underwater,
        PresetId::Jungle,
        PresetId::Snow,
        PresetId::Indoor,
        PresetId::Standard,
        PresetId::Sunset,
        PresetId::Night,
        PresetId::Bright,
        PresetId::Cinematic,
        PresetId::Retro,
        PresetId::BlackAndWhite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PresetId::Portrait => "portrait",
            PresetId::Pets => "pets",
            PresetId::Food => "food",
            PresetId::Landscape => "landscape",
            PresetId::Architecture => "architecture",
            PresetId::City => "city",
            PresetId::Ocean => "ocean",
            PresetId::Underwater => "underwater",
            PresetId::Jungle => "jungle",
            PresetId::Snow => "snow",
            PresetId::Indoor => "indoor",
            PresetId::Standard => "standard",
            PresetId::Sunset => "sunset",
            PresetId::Night => "night",
            PresetId::Bright => "bright",
            PresetId::Cinematic => "cinematic",
            PresetId::Retro => "retro",
            PresetId::BlackAndWhite => "black_and_white",
        }
    }

    #[inline]
    pub fn definition(self) -> &'static PresetDefinition {
        definition(self)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetId {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        if matches!(wanted.as_str(), "b_and_w" | "bw") {
            return Ok(PresetId::BlackAndWhite);
        }
        PresetId::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| EnhanceError::UnknownPreset(s.to_string()))
    }
}

/// One operation in a preset's schedule.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub op: OpKind,
    /// Overrides of the operation's schema defaults
    pub base: &'static [(Param, f32)],
    pub rules: &'static [Rule],
}

impl Step {
    pub const fn new(op: OpKind, base: &'static [(Param, f32)], rules: &'static [Rule]) -> Self {
        Self { op, base, rules }
    }

    /// Base value of `param`: the override if listed, else the default.
    pub fn base_value(&self, param: Param) -> f32 {
        self.base
            .iter()
            .find(|(p, _)| *p == param)
            .map_or(param.spec().default, |&(_, v)| v)
    }

    /// Schema defaults with this step's overrides applied.
    pub fn base_params(&self) -> ParamSet {
        let mut params = ParamSet::defaults();
        for &(param, value) in self.base {
            params.set(param, value);
        }
        params
    }
}

/// A named, immutable enhancement schedule.
#[derive(Debug)]
pub struct PresetDefinition {
    pub id: PresetId,
    pub description: &'static str,
    pub steps: &'static [Step],
}

/// A preset whose data breaks a structural rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresetError {
    #[error("{preset}: {later} must not run before {earlier}")]
    OutOfOrder {
        preset: PresetId,
        earlier: OpKind,
        later: OpKind,
    },

    #[error("{preset}: step {step} ({op}) lists {param}, which belongs to {owner}")]
    ForeignParam {
        preset: PresetId,
        step: usize,
        op: OpKind,
        param: Param,
        owner: OpKind,
    },

    #[error("{preset}: base value {value} for {param} is outside its range")]
    BaseOutOfRange {
        preset: PresetId,
        param: Param,
        value: f32,
    },

    #[error("{preset}: {op} must come after every other operation")]
    FinishingNotLast { preset: PresetId, op: OpKind },
}

/// Operations whose first occurrence must precede any occurrence of the
/// paired operation.
const ORDER: &[(OpKind, OpKind)] = &[
    (OpKind::Denoise, OpKind::Sharpen),
    (OpKind::Denoise, OpKind::Clarity),
    (OpKind::WhiteBalance, OpKind::Saturation),
    (OpKind::WhiteBalance, OpKind::Vibrance),
    (OpKind::WhiteBalance, OpKind::SelectiveColor),
];

impl PresetDefinition {
    /// Check ordering, parameter ownership and base ranges.
    pub fn validate(&self) -> Result<(), PresetError> {
        let preset = self.id;

        for (index, step) in self.steps.iter().enumerate() {
            for &(param, value) in step.base {
                if param.op() != step.op {
                    return Err(PresetError::ForeignParam {
                        preset,
                        step: index,
                        op: step.op,
                        param,
                        owner: param.op(),
                    });
                }
                if !param.spec().contains(value) {
                    return Err(PresetError::BaseOutOfRange {
                        preset,
                        param,
                        value,
                    });
                }
            }
            if let Some(rule) = step.rules.iter().find(|r| r.param.op() != step.op) {
                return Err(PresetError::ForeignParam {
                    preset,
                    step: index,
                    op: step.op,
                    param: rule.param,
                    owner: rule.param.op(),
                });
            }
        }

        let position = |op: OpKind| self.steps.iter().position(|s| s.op == op);
        for &(earlier, later) in ORDER {
            if let (Some(e), Some(l)) = (position(earlier), position(later)) {
                if l < e {
                    return Err(PresetError::OutOfOrder {
                        preset,
                        earlier,
                        later,
                    });
                }
            }
        }

        let mut first_finishing = None;
        for step in self.steps {
            let finishing = matches!(step.op, OpKind::Vignette | OpKind::Grain);
            match (finishing, first_finishing) {
                (true, None) => first_finishing = Some(step.op),
                (false, Some(op)) => return Err(PresetError::FinishingNotLast { preset, op }),
                _ => {}
            }
        }
        if let Some(grain) = self.steps.iter().position(|s| s.op == OpKind::Grain) {
            if self.steps[grain + 1..].iter().any(|s| s.op != OpKind::Grain) {
                return Err(PresetError::FinishingNotLast {
                    preset,
                    op: OpKind::Grain,
                });
            }
        }
        Ok(())
    }

    /// Whether the schedule contains `op`.
    pub fn uses(&self, op: OpKind) -> bool {
        self.steps.iter().any(|s| s.op == op)
    }
}

/// The static definition of a preset.
pub fn definition(id: PresetId) -> &'static PresetDefinition {
    match id {
        PresetId::Portrait => &definitions::PORTRAIT,
        PresetId::Pets => &definitions::PETS,
        PresetId::Food => &definitions::FOOD,
        PresetId::Landscape => &definitions::LANDSCAPE,
        PresetId::Architecture => &definitions::ARCHITECTURE,
        PresetId::City => &definitions::CITY,
        PresetId::Ocean => &definitions::OCEAN,
        PresetId::Underwater => &definitions::UNDERWATER,
        PresetId::Jungle => &definitions::JUNGLE,
        PresetId::Snow => &definitions::SNOW,
        PresetId::Indoor => &definitions::INDOOR,
        PresetId::Standard => &definitions::STANDARD,
        PresetId::Sunset => &definitions::SUNSET,
        PresetId::Night => &definitions::NIGHT,
        PresetId::Bright => &definitions::BRIGHT,
        PresetId::Cinematic => &definitions::CINEMATIC,
        PresetId::Retro => &definitions::RETRO,
        PresetId::BlackAndWhite => &definitions::BLACK_AND_WHITE,
    }
}
