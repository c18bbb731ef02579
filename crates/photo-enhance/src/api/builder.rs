//! Enhancer builder: the entry point that runs the whole pipeline.

use tracing::{debug, debug_span, info};

use crate::adapt::{adapt, EffectiveParameterSet};
use crate::analysis::{analyze, CharacteristicVector};
use crate::buffer::{OutputFormat, PixelBuffer};
use crate::ops::{self, ExecContext};
use crate::presets::{PresetDefinition, PresetId};

use super::{EnhanceError, EnhancedImage, PipelineResult};

/// Runs analysis, adaptation and a preset's operations on one buffer.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`enhance()`](Self::enhance) takes `&self`, so one `Enhancer` can serve
///   any number of images, also from several threads at once
/// - The enhancer holds no per-image state; everything measured or decided
///   for an image travels in the returned [`EnhancedImage`]
///
/// # Example
///
/// ```
/// use photo_enhance::{Enhancer, OutputFormat, PixelBuffer, PresetId};
///
/// let buffer = PixelBuffer::filled(16, 16, 3, 0.3).unwrap();
/// let enhancer = Enhancer::new().parallel(false);
///
/// let result = enhancer
///     .enhance(buffer, PresetId::Landscape, OutputFormat::Png)
///     .unwrap();
///
/// assert_eq!(result.width(), 16);
/// assert_eq!(result.max_bit_depth, 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Enhancer {
    ctx: ExecContext,
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl Enhancer {
    /// Row-parallel execution is on by default.
    pub fn new() -> Self {
        Self {
            ctx: ExecContext { parallel: true },
        }
    }

    /// Allow or forbid row-parallel execution. Results are identical either
    /// way.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.ctx.parallel = enabled;
        self
    }

    /// Characterize a buffer without changing it.
    pub fn analyze(&self, buffer: &PixelBuffer) -> CharacteristicVector {
        analyze(buffer, self.ctx.parallel)
    }

    /// The schedule `preset` would run on `buffer`.
    pub fn plan(
        &self,
        buffer: &PixelBuffer,
        preset: PresetId,
    ) -> Result<EffectiveParameterSet, EnhanceError> {
        buffer.validate()?;
        Ok(adapt(preset.definition(), &self.analyze(buffer)))
    }

    /// Enhance `buffer` with one of the built-in presets.
    pub fn enhance(
        &self,
        buffer: PixelBuffer,
        preset: PresetId,
        format: OutputFormat,
    ) -> PipelineResult {
        self.enhance_with(buffer, preset.definition(), format)
    }

    /// Enhance with a preset given by name (`"night"`, `"b_and_w"`, ...).
    ///
    /// An unknown name fails with [`EnhanceError::UnknownPreset`] before any
    /// work is done.
    pub fn enhance_named(
        &self,
        buffer: PixelBuffer,
        preset: &str,
        format: OutputFormat,
    ) -> PipelineResult {
        let id: PresetId = preset.parse()?;
        self.enhance(buffer, id, format)
    }

    /// Enhance with an arbitrary preset definition.
    ///
    /// Applies the full pipeline:
    /// 1. Validate the buffer and clamp its samples into 0.0..=1.0
    /// 2. Analyze once
    /// 3. Adapt the preset once
    /// 4. Apply every step in order, checking the output stays finite
    /// 5. Apply the format hint (alpha handling)
    pub fn enhance_with(
        &self,
        mut buffer: PixelBuffer,
        preset: &PresetDefinition,
        format: OutputFormat,
    ) -> PipelineResult {
        let span = debug_span!(
            "enhance",
            preset = %preset.id,
            width = buffer.width(),
            height = buffer.height()
        );
        let _guard = span.enter();

        buffer.validate()?;
        buffer.clamp_samples();

        let characteristics = analyze(&buffer, self.ctx.parallel);
        debug!(?characteristics, "analyzed");

        let parameters = adapt(preset, &characteristics);

        for (index, step) in parameters.steps.iter().enumerate() {
            debug!(index, op = %step.op, params = ?step.params, "applying");
            ops::apply(step.op, &mut buffer, &step.params, &self.ctx)?;
            if let Some(sample) = buffer.first_non_finite() {
                return Err(EnhanceError::OperationFailure {
                    operation: step.op.name(),
                    detail: format!("non-finite sample at index {sample}"),
                });
            }
        }

        format.finalize(&mut buffer);

        info!(
            preset = %preset.id,
            steps = parameters.steps.len(),
            brightness = characteristics.brightness,
            noise = characteristics.noise,
            "enhanced"
        );

        Ok(EnhancedImage {
            buffer,
            characteristics,
            parameters,
            max_bit_depth: format.max_bit_depth(),
        })
    }
}
