use photo_enhance::{CharacteristicVector, ColorTemperature, EffectiveParameterSet, PresetId};
use serde::Serialize;
use std::fmt;

/// What `rawtone analyze` prints.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub width: usize,
    pub height: usize,
    pub bit_depth: u8,
    pub brightness: f32,
    pub contrast: f32,
    pub noise: f32,
    pub saturation: f32,
    pub sharpness: f32,
    pub dark_ratio: f32,
    pub bright_ratio: f32,
    pub skin_ratio: f32,
    pub green_ratio: f32,
    pub blue_ratio: f32,
    pub warm_ratio: f32,
    pub channel_means: [f32; 3],
    pub low_light: bool,
    pub high_key: bool,
    pub temperature: &'static str,
}

impl AnalysisReport {
    pub fn new(width: usize, height: usize, bit_depth: u8, v: &CharacteristicVector) -> Self {
        Self {
            width,
            height,
            bit_depth,
            brightness: v.brightness,
            contrast: v.contrast,
            noise: v.noise,
            saturation: v.saturation,
            sharpness: v.sharpness,
            dark_ratio: v.dark_ratio,
            bright_ratio: v.bright_ratio,
            skin_ratio: v.skin_ratio,
            green_ratio: v.green_ratio,
            blue_ratio: v.blue_ratio,
            warm_ratio: v.warm_ratio,
            channel_means: v.channel_means,
            low_light: v.is_low_light(),
            high_key: v.is_high_key(),
            temperature: match v.color_temperature() {
                ColorTemperature::Warm => "warm",
                ColorTemperature::Cool => "cool",
                ColorTemperature::Neutral => "neutral",
            },
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size          {}x{} ({}-bit)", self.width, self.height, self.bit_depth)?;
        writeln!(f, "brightness    {:.3}", self.brightness)?;
        writeln!(f, "contrast      {:.3}", self.contrast)?;
        writeln!(f, "noise         {:.4}", self.noise)?;
        writeln!(f, "saturation    {:.3}", self.saturation)?;
        writeln!(f, "sharpness     {:.3}", self.sharpness)?;
        writeln!(
            f,
            "ratios        dark {:.2}  bright {:.2}  skin {:.2}  green {:.2}  blue {:.2}  warm {:.2}",
            self.dark_ratio,
            self.bright_ratio,
            self.skin_ratio,
            self.green_ratio,
            self.blue_ratio,
            self.warm_ratio
        )?;
        let [r, g, b] = self.channel_means;
        writeln!(f, "channel means {r:.3} {g:.3} {b:.3}")?;
        write!(
            f,
            "character     {}{}{}",
            self.temperature,
            if self.low_light { ", low light" } else { "" },
            if self.high_key { ", high key" } else { "" }
        )
    }
}

/// What `rawtone plan` prints: one entry per preset step.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub preset: String,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanStep {
    pub op: &'static str,
    pub params: Vec<PlanParam>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanParam {
    pub name: &'static str,
    pub value: f32,
}

impl PlanReport {
    pub fn new(set: &EffectiveParameterSet) -> Self {
        let steps = set
            .steps
            .iter()
            .map(|step| PlanStep {
                op: step.op.name(),
                params: step
                    .params
                    .for_op(step.op)
                    .map(|(param, value)| PlanParam {
                        name: param.name(),
                        value,
                    })
                    .collect(),
            })
            .collect();
        Self {
            preset: set.preset.to_string(),
            steps,
        }
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preset {}", self.preset)?;
        for (index, step) in self.steps.iter().enumerate() {
            write!(f, "\n{:>2}. {}", index + 1, step.op)?;
            for param in &step.params {
                write!(f, "  {}={:.3}", param.name, param.value)?;
            }
        }
        Ok(())
    }
}

/// One line of `rawtone presets`.
#[derive(Debug, Clone, Serialize)]
pub struct PresetSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<&'static str>,
}

impl PresetSummary {
    pub fn all() -> Vec<Self> {
        PresetId::ALL
            .iter()
            .map(|id| {
                let def = id.definition();
                Self {
                    name: id.name(),
                    description: def.description,
                    steps: def.steps.iter().map(|s| s.op.name()).collect(),
                }
            })
            .collect()
    }
}
