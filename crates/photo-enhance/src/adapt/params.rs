//! Operation parameters and their declared ranges.

use std::fmt;

use crate::ops::OpKind;

/// Name, range and default of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamSpec {
    const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

macro_rules! params {
    ($( $variant:ident => $op:ident, $name:literal, $min:expr, $max:expr, $default:expr; )+) => {
        /// Every tunable parameter of every operation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Param {
            $( $variant, )+
        }

        impl Param {
            pub const ALL: &'static [Param] = &[ $( Param::$variant, )+ ];
            pub const COUNT: usize = Self::ALL.len();

            pub const fn spec(self) -> ParamSpec {
                match self {
                    $( Param::$variant => ParamSpec::new($name, $min, $max, $default), )+
                }
            }

            /// The operation this parameter belongs to.
            pub const fn op(self) -> OpKind {
                match self {
                    $( Param::$variant => OpKind::$op, )+
                }
            }
        }
    };
}

params! {
    DenoiseStrength => Denoise, "denoise.strength", 0.0, 1.0, 0.0;
    SkinSoftenStrength => SkinSoften, "skin_soften.strength", 0.0, 1.0, 0.0;
    WbNeutralize => WhiteBalance, "white_balance.neutralize", 0.0, 1.0, 0.0;
    WbTemperature => WhiteBalance, "white_balance.temperature", -0.3, 0.3, 0.0;
    WbTint => WhiteBalance, "white_balance.tint", -0.3, 0.3, 0.0;
    ExposureTarget => Exposure, "exposure.target", 0.25, 0.75, 0.5;
    ExposureStrength => Exposure, "exposure.strength", 0.0, 1.0, 0.0;
    ToneBlack => ToneCurve, "tone.black", 0.0, 0.2, 0.0;
    ToneWhite => ToneCurve, "tone.white", 0.8, 1.0, 1.0;
    ToneFade => ToneCurve, "tone.fade", 0.0, 0.2, 0.0;
    ToneContrast => ToneCurve, "tone.contrast", -0.5, 1.0, 0.0;
    Shadows => ShadowsHighlights, "shadows", -0.3, 0.3, 0.0;
    Highlights => ShadowsHighlights, "highlights", -0.25, 0.25, 0.0;
    ClaheClipLimit => LocalContrast, "local_contrast.clip_limit", 1.0, 4.0, 2.0;
    ClaheTiles => LocalContrast, "local_contrast.tiles", 2.0, 16.0, 8.0;
    ClaheAmount => LocalContrast, "local_contrast.amount", 0.0, 1.0, 0.0;
    ClarityAmount => Clarity, "clarity.amount", 0.0, 1.0, 0.0;
    ClarityRadius => Clarity, "clarity.radius", 1.0, 16.0, 8.0;
    SaturationScale => Saturation, "saturation.scale", 0.0, 2.0, 1.0;
    SaturationShadows => Saturation, "saturation.shadows", -0.5, 0.5, 0.0;
    VibranceAmount => Vibrance, "vibrance.amount", -0.5, 0.6, 0.0;
    SelectiveHue => SelectiveColor, "selective.hue", 0.0, 360.0, 0.0;
    SelectiveWidth => SelectiveColor, "selective.width", 10.0, 90.0, 30.0;
    SelectiveShift => SelectiveColor, "selective.shift", -30.0, 30.0, 0.0;
    SelectiveSaturation => SelectiveColor, "selective.saturation", -0.5, 0.5, 0.0;
    SplitShadowA => SplitTone, "split.shadow_a", -0.06, 0.06, 0.0;
    SplitShadowB => SplitTone, "split.shadow_b", -0.06, 0.06, 0.0;
    SplitHighlightA => SplitTone, "split.highlight_a", -0.06, 0.06, 0.0;
    SplitHighlightB => SplitTone, "split.highlight_b", -0.06, 0.06, 0.0;
    RestoreRed => ChannelRestore, "restore.red", 0.0, 1.0, 0.0;
    RestoreBlueCut => ChannelRestore, "restore.blue_cut", 0.0, 0.3, 0.0;
    MonoRed => Monochrome, "mono.red", 0.0, 1.0, 0.299;
    MonoGreen => Monochrome, "mono.green", 0.0, 1.0, 0.587;
    MonoBlue => Monochrome, "mono.blue", 0.0, 1.0, 0.114;
    SharpenAmount => Sharpen, "sharpen.amount", 0.0, 0.8, 0.0;
    SharpenRadius => Sharpen, "sharpen.radius", 0.5, 3.0, 1.0;
    SharpenThreshold => Sharpen, "sharpen.threshold", 0.0, 0.05, 0.01;
    VignetteStrength => Vignette, "vignette.strength", 0.0, 0.6, 0.0;
    VignetteRadius => Vignette, "vignette.radius", 0.8, 2.0, 1.1;
    GrainAmount => Grain, "grain.amount", 0.0, 0.08, 0.0;
}

impl Param {
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete values for every parameter, each within its declared range.
///
/// Starts at the schema defaults; [`set`](Self::set) clamps.
#[derive(Clone, PartialEq)]
pub struct ParamSet {
    values: [f32; Param::COUNT],
}

impl ParamSet {
    pub fn defaults() -> Self {
        let mut values = [0.0; Param::COUNT];
        for &param in Param::ALL {
            values[param as usize] = param.spec().default;
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        self.values[param as usize]
    }

    /// Store `value` clamped into the parameter's range. NaN stores the
    /// default.
    pub fn set(&mut self, param: Param, value: f32) {
        let spec = param.spec();
        self.values[param as usize] = if value.is_nan() {
            spec.default
        } else {
            spec.clamp(value)
        };
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, param: Param, value: f32) -> Self {
        self.set(param, value);
        self
    }

    /// Parameters of `op` with their values, in declaration order.
    pub fn for_op(&self, op: OpKind) -> impl Iterator<Item = (Param, f32)> + '_ {
        Param::ALL
            .iter()
            .filter(move |p| p.op() == op)
            .map(|&p| (p, self.get(p)))
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for &param in Param::ALL {
            let value = self.get(param);
            if value != param.spec().default {
                map.entry(&param.name(), &value);
            }
        }
        map.finish()
    }
}
