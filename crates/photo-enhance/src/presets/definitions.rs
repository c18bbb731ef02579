//! The 18 preset schedules.
//!
//! Base values override the operation defaults; rules nudge them per image.
//! Thresholds and slopes are tuning constants, checked against the
//! end-to-end scenarios in the domain tests rather than derived.

use crate::adapt::{Curve, Param, Rule};
use crate::analysis::Characteristic as C;
use crate::ops::OpKind::*;

use super::{PresetDefinition, PresetId, Step};

const fn above(param: Param, input: C, threshold: f32, slope: f32) -> Rule {
    Rule::new(param, input, Curve::Above { threshold, slope })
}

const fn below(param: Param, input: C, threshold: f32, slope: f32) -> Rule {
    Rule::new(param, input, Curve::Below { threshold, slope })
}

const fn linear(param: Param, input: C, pivot: f32, slope: f32) -> Rule {
    Rule::new(param, input, Curve::Linear { pivot, slope })
}

/// Shared by most presets: stronger denoising as the noise estimate rises.
const DENOISE_WITH_NOISE: Rule = above(Param::DenoiseStrength, C::Noise, 0.01, 8.0);

/// More denoising as frames get darker, at most +0.175.
const DENOISE_WHEN_DARK: Rule = below(Param::DenoiseStrength, C::Brightness, 0.35, 0.5);

/// The low-light variant, at most +0.35.
const DENOISE_WHEN_VERY_DARK: Rule = below(Param::DenoiseStrength, C::Brightness, 0.35, 1.0);

/// Less boost for images that are already colorful.
const TAME_SATURATED: Rule = above(Param::SaturationScale, C::Saturation, 0.5, -0.3);

const MILD_DENOISE: Step = Step::new(
    Denoise,
    &[(Param::DenoiseStrength, 0.1)],
    &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
);

pub(super) static STANDARD: PresetDefinition = PresetDefinition {
    id: PresetId::Standard,
    description: "Balanced exposure, contrast and detail for everyday photos",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.15)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.45), (Param::ExposureStrength, 0.1)],
            &[
                below(Param::ExposureStrength, C::Brightness, 0.4, 3.0),
                above(Param::ExposureStrength, C::Brightness, 0.65, 1.5),
            ],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.5), (Param::ClaheAmount, 0.45)],
            &[above(Param::ClaheAmount, C::Contrast, 0.4, -0.8)],
        ),
        Step::new(
            Saturation,
            &[(Param::SaturationScale, 1.02)],
            &[above(Param::SaturationScale, C::Saturation, 0.5, -0.2)],
        ),
        Step::new(
            Sharpen,
            &[(Param::SharpenAmount, 0.3)],
            &[below(Param::SharpenAmount, C::Sharpness, 0.3, 1.0)],
        ),
    ],
};

pub(super) static PORTRAIT: PresetDefinition = PresetDefinition {
    id: PresetId::Portrait,
    description: "Soft skin, gentle contrast and natural skin tones",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.2)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(
            SkinSoften,
            &[(Param::SkinSoftenStrength, 0.35)],
            &[above(Param::SkinSoftenStrength, C::SkinRatio, 0.05, 1.0)],
        ),
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.52), (Param::ExposureStrength, 0.2)],
            &[below(Param::ExposureStrength, C::Brightness, 0.45, 2.5)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.3), (Param::ClaheAmount, 0.3)],
            &[],
        ),
        // calm down over-saturated skin
        Step::new(
            SelectiveColor,
            &[
                (Param::SelectiveHue, 50.0),
                (Param::SelectiveWidth, 35.0),
                (Param::SelectiveSaturation, -0.1),
            ],
            &[above(Param::SelectiveSaturation, C::Saturation, 0.45, -0.5)],
        ),
        Step::new(
            Saturation,
            &[(Param::SaturationScale, 1.03)],
            &[above(Param::SaturationScale, C::Saturation, 0.5, -0.2)],
        ),
        Step::new(
            Sharpen,
            &[(Param::SharpenAmount, 0.25), (Param::SharpenRadius, 1.2)],
            &[below(Param::SharpenAmount, C::Sharpness, 0.3, 0.8)],
        ),
    ],
};

pub(super) static PETS: PresetDefinition = PresetDefinition {
    id: PresetId::Pets,
    description: "Crisp fur detail and neutral color",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.15)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(WhiteBalance, &[(Param::WbNeutralize, 0.2)], &[]),
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.48), (Param::ExposureStrength, 0.1)],
            &[below(Param::ExposureStrength, C::Brightness, 0.4, 2.5)],
        ),
        Step::new(
            Clarity,
            &[(Param::ClarityAmount, 0.3), (Param::ClarityRadius, 2.0)],
            &[],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.6), (Param::ClaheAmount, 0.4)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.02)], &[TAME_SATURATED]),
        Step::new(
            Sharpen,
            &[(Param::SharpenAmount, 0.45), (Param::SharpenRadius, 1.2)],
            &[below(Param::SharpenAmount, C::Sharpness, 0.35, 1.0)],
        ),
    ],
};

pub(super) static FOOD: PresetDefinition = PresetDefinition {
    id: PresetId::Food,
    description: "Bright, warm and appetizing",
    steps: &[
        MILD_DENOISE,
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.53), (Param::ExposureStrength, 0.3)],
            &[below(Param::ExposureStrength, C::Brightness, 0.5, 2.0)],
        ),
        Step::new(
            WhiteBalance,
            &[(Param::WbTemperature, 0.05), (Param::WbTint, 0.02)],
            &[],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.3), (Param::ClaheAmount, 0.35)],
            &[],
        ),
        Step::new(
            Vibrance,
            &[(Param::VibranceAmount, 0.25)],
            &[above(Param::VibranceAmount, C::Saturation, 0.45, -0.8)],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.12)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.35)], &[]),
    ],
};

pub(super) static LANDSCAPE: PresetDefinition = PresetDefinition {
    id: PresetId::Landscape,
    description: "Recovered sky, opened shadows and vivid foliage",
    steps: &[
        MILD_DENOISE,
        Step::new(
            ShadowsHighlights,
            &[(Param::Shadows, 0.15), (Param::Highlights, -0.12)],
            &[
                above(Param::Shadows, C::DarkRatio, 0.2, 0.3),
                above(Param::Highlights, C::BrightRatio, 0.1, -0.3),
            ],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.6), (Param::ClaheAmount, 0.5)],
            &[above(Param::ClaheAmount, C::Contrast, 0.45, -1.0)],
        ),
        Step::new(
            Vibrance,
            &[(Param::VibranceAmount, 0.15)],
            &[above(Param::VibranceAmount, C::Saturation, 0.45, -0.5)],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.12)], &[TAME_SATURATED]),
        Step::new(
            Sharpen,
            &[(Param::SharpenAmount, 0.4)],
            &[below(Param::SharpenAmount, C::Sharpness, 0.3, 1.0)],
        ),
    ],
};

pub(super) static ARCHITECTURE: PresetDefinition = PresetDefinition {
    id: PresetId::Architecture,
    description: "Neutral color and strong structural detail",
    steps: &[
        MILD_DENOISE,
        Step::new(WhiteBalance, &[(Param::WbNeutralize, 0.25)], &[]),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.5), (Param::ClaheAmount, 0.45)],
            &[],
        ),
        Step::new(
            Clarity,
            &[(Param::ClarityAmount, 0.35), (Param::ClarityRadius, 8.0)],
            &[below(Param::ClarityAmount, C::Contrast, 0.3, 0.5)],
        ),
        Step::new(
            Sharpen,
            &[(Param::SharpenAmount, 0.5)],
            &[below(Param::SharpenAmount, C::Sharpness, 0.35, 0.8)],
        ),
    ],
};

pub(super) static CITY: PresetDefinition = PresetDefinition {
    id: PresetId::City,
    description: "Punchy contrast and slightly muted urban color",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.15)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(
            ToneCurve,
            &[(Param::ToneContrast, 0.25)],
            &[above(Param::ToneContrast, C::Contrast, 0.5, -0.5)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.5), (Param::ClaheAmount, 0.45)],
            &[],
        ),
        Step::new(
            Clarity,
            &[(Param::ClarityAmount, 0.3), (Param::ClarityRadius, 4.0)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 0.88)], &[]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.45)], &[]),
    ],
};

pub(super) static OCEAN: PresetDefinition = PresetDefinition {
    id: PresetId::Ocean,
    description: "Clean blues and bright, cool water",
    steps: &[
        MILD_DENOISE,
        Step::new(
            WhiteBalance,
            &[(Param::WbTemperature, -0.04), (Param::WbTint, -0.03)],
            &[],
        ),
        Step::new(ShadowsHighlights, &[(Param::Highlights, 0.08)], &[]),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.3), (Param::ClaheAmount, 0.35)],
            &[],
        ),
        Step::new(
            SelectiveColor,
            &[
                (Param::SelectiveHue, 240.0),
                (Param::SelectiveWidth, 45.0),
                (Param::SelectiveSaturation, 0.2),
            ],
            &[below(Param::SelectiveSaturation, C::BlueRatio, 0.2, 0.5)],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.08)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.3)], &[]),
    ],
};

pub(super) static UNDERWATER: PresetDefinition = PresetDefinition {
    id: PresetId::Underwater,
    description: "Restored reds and reduced blue-green cast",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.3)],
            &[
                above(Param::DenoiseStrength, C::Noise, 0.01, 10.0),
                DENOISE_WHEN_VERY_DARK,
            ],
        ),
        Step::new(
            ChannelRestore,
            &[(Param::RestoreRed, 0.5), (Param::RestoreBlueCut, 0.1)],
            &[linear(Param::RestoreRed, C::RedDeficit, 0.1, 2.0)],
        ),
        Step::new(
            WhiteBalance,
            &[(Param::WbNeutralize, 0.4), (Param::WbTint, 0.06)],
            &[],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 2.0), (Param::ClaheAmount, 0.55)],
            &[],
        ),
        Step::new(
            Saturation,
            &[(Param::SaturationScale, 1.2)],
            &[above(Param::SaturationScale, C::Saturation, 0.5, -0.4)],
        ),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.5)], &[]),
    ],
};

pub(super) static JUNGLE: PresetDefinition = PresetDefinition {
    id: PresetId::Jungle,
    description: "Lush greens with controlled exposure under canopy",
    steps: &[
        MILD_DENOISE,
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.47), (Param::ExposureStrength, 0.0)],
            &[
                above(Param::ExposureStrength, C::Brightness, 0.52, 3.0),
                below(Param::ExposureStrength, C::Brightness, 0.35, 2.0),
            ],
        ),
        // pull yellow-greens toward green
        Step::new(
            SelectiveColor,
            &[
                (Param::SelectiveHue, 115.0),
                (Param::SelectiveWidth, 35.0),
                (Param::SelectiveShift, 20.0),
            ],
            &[],
        ),
        Step::new(
            SelectiveColor,
            &[
                (Param::SelectiveHue, 145.0),
                (Param::SelectiveWidth, 40.0),
                (Param::SelectiveSaturation, 0.12),
            ],
            &[above(Param::SelectiveSaturation, C::GreenRatio, 0.5, -0.2)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.4), (Param::ClaheAmount, 0.4)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.1)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.3)], &[]),
    ],
};

pub(super) static SNOW: PresetDefinition = PresetDefinition {
    id: PresetId::Snow,
    description: "Bright, clean whites without a gray cast",
    steps: &[
        MILD_DENOISE,
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.66), (Param::ExposureStrength, 0.3)],
            &[below(Param::ExposureStrength, C::Brightness, 0.62, 2.5)],
        ),
        Step::new(SplitTone, &[(Param::SplitShadowB, 0.02)], &[]),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.2), (Param::ClaheAmount, 0.3)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.02)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.25)], &[]),
    ],
};

pub(super) static INDOOR: PresetDefinition = PresetDefinition {
    id: PresetId::Indoor,
    description: "Corrected artificial light and lifted shadows",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.3)],
            &[
                above(Param::DenoiseStrength, C::Noise, 0.01, 10.0),
                DENOISE_WHEN_VERY_DARK,
            ],
        ),
        Step::new(
            WhiteBalance,
            &[(Param::WbNeutralize, 0.6)],
            &[above(Param::WbNeutralize, C::WarmRatio, 0.3, 0.5)],
        ),
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.46), (Param::ExposureStrength, 0.2)],
            &[below(Param::ExposureStrength, C::Brightness, 0.42, 3.0)],
        ),
        Step::new(
            ShadowsHighlights,
            &[(Param::Shadows, 0.18)],
            &[above(Param::Shadows, C::DarkRatio, 0.25, 0.3)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.4), (Param::ClaheAmount, 0.4)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.03)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.25)], &[]),
    ],
};

pub(super) static SUNSET: PresetDefinition = PresetDefinition {
    id: PresetId::Sunset,
    description: "Warm golden tones with protected highlights",
    steps: &[
        MILD_DENOISE,
        Step::new(
            WhiteBalance,
            &[(Param::WbTemperature, 0.08), (Param::WbTint, 0.04)],
            &[],
        ),
        Step::new(
            ShadowsHighlights,
            &[(Param::Highlights, -0.15)],
            &[above(Param::Highlights, C::BrightRatio, 0.1, -0.4)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.3), (Param::ClaheAmount, 0.35)],
            &[],
        ),
        Step::new(
            Vibrance,
            &[(Param::VibranceAmount, 0.2)],
            &[above(Param::VibranceAmount, C::Saturation, 0.45, -0.6)],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 1.1)], &[TAME_SATURATED]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.2)], &[]),
    ],
};

pub(super) static NIGHT: PresetDefinition = PresetDefinition {
    id: PresetId::Night,
    description: "Aggressive noise reduction and a strong exposure lift",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.6)],
            &[
                above(Param::DenoiseStrength, C::Noise, 0.01, 10.0),
                DENOISE_WHEN_VERY_DARK,
            ],
        ),
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.48), (Param::ExposureStrength, 0.6)],
            &[below(Param::ExposureStrength, C::Brightness, 0.4, 3.0)],
        ),
        Step::new(
            ToneCurve,
            &[(Param::ToneBlack, 0.02), (Param::ToneContrast, 0.1)],
            &[],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.2), (Param::ClaheAmount, 0.3)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 0.92)], &[]),
        // the exposure lift amplifies what the first pass left behind
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.35)],
            &[
                above(Param::DenoiseStrength, C::Noise, 0.02, 6.0),
                DENOISE_WHEN_DARK,
            ],
        ),
    ],
};

pub(super) static BRIGHT: PresetDefinition = PresetDefinition {
    id: PresetId::Bright,
    description: "Airy high-key look with soft contrast",
    steps: &[
        MILD_DENOISE,
        Step::new(
            Exposure,
            &[(Param::ExposureTarget, 0.62), (Param::ExposureStrength, 0.3)],
            &[below(Param::ExposureStrength, C::Brightness, 0.55, 2.5)],
        ),
        Step::new(ToneCurve, &[(Param::ToneContrast, -0.12)], &[]),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.15), (Param::ClaheAmount, 0.25)],
            &[],
        ),
        Step::new(
            Saturation,
            &[(Param::SaturationScale, 0.96), (Param::SaturationShadows, -0.15)],
            &[],
        ),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.2)], &[]),
    ],
};

pub(super) static CINEMATIC: PresetDefinition = PresetDefinition {
    id: PresetId::Cinematic,
    description: "Teal shadows, warm highlights and a dark frame",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.15)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(
            SplitTone,
            &[
                (Param::SplitShadowA, -0.02),
                (Param::SplitShadowB, -0.03),
                (Param::SplitHighlightA, 0.015),
                (Param::SplitHighlightB, 0.035),
            ],
            &[],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.4), (Param::ClaheAmount, 0.4)],
            &[],
        ),
        Step::new(
            ToneCurve,
            &[(Param::ToneContrast, 0.25)],
            &[above(Param::ToneContrast, C::Contrast, 0.5, -0.5)],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 0.95)], &[]),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.25)], &[]),
        Step::new(
            Vignette,
            &[(Param::VignetteStrength, 0.18), (Param::VignetteRadius, 1.1)],
            &[],
        ),
    ],
};

pub(super) static RETRO: PresetDefinition = PresetDefinition {
    id: PresetId::Retro,
    description: "Faded film look with warm cast and grain",
    steps: &[
        MILD_DENOISE,
        Step::new(
            ToneCurve,
            &[(Param::ToneFade, 0.08), (Param::ToneContrast, -0.05)],
            &[],
        ),
        Step::new(
            WhiteBalance,
            &[(Param::WbTemperature, 0.05), (Param::WbTint, -0.03)],
            &[],
        ),
        Step::new(Saturation, &[(Param::SaturationScale, 0.82)], &[]),
        Step::new(Vignette, &[(Param::VignetteStrength, 0.2)], &[]),
        Step::new(Grain, &[(Param::GrainAmount, 0.025)], &[]),
    ],
};

pub(super) static BLACK_AND_WHITE: PresetDefinition = PresetDefinition {
    id: PresetId::BlackAndWhite,
    description: "Red-filtered monochrome with deep contrast",
    steps: &[
        Step::new(
            Denoise,
            &[(Param::DenoiseStrength, 0.15)],
            &[DENOISE_WITH_NOISE, DENOISE_WHEN_DARK],
        ),
        Step::new(
            Monochrome,
            &[
                (Param::MonoRed, 0.5),
                (Param::MonoGreen, 0.35),
                (Param::MonoBlue, 0.15),
            ],
            &[],
        ),
        Step::new(
            ToneCurve,
            &[(Param::ToneContrast, 0.35)],
            &[above(Param::ToneContrast, C::Contrast, 0.5, -0.6)],
        ),
        Step::new(
            LocalContrast,
            &[(Param::ClaheClipLimit, 1.5), (Param::ClaheAmount, 0.4)],
            &[],
        ),
        Step::new(Sharpen, &[(Param::SharpenAmount, 0.3)], &[]),
    ],
};
