use std::path::Path;

use photo_enhance::{Enhancer, OutputFormat, PresetId};

use crate::delivery::{self, DecodedImage};
use crate::error::AppError;
use crate::models::{AnalysisReport, AppConfig, PlanReport};

/// Per-call choices that override the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhanceOptions {
    pub preset: Option<PresetId>,
    pub format: Option<OutputFormat>,
    /// Skip fitting the result into the delivery box
    pub keep_size: bool,
}

/// Result from running the enhance pipeline
#[derive(Debug, Clone)]
pub struct EnhanceOutput {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    pub preset: PresetId,
    pub format: OutputFormat,
    pub width: usize,
    pub height: usize,
    /// Quality used for JPEG output
    pub jpeg_quality: Option<u8>,
}

/// Pipeline that orchestrates decode → enhance → resize → encode
pub struct EnhancePipeline {
    config: AppConfig,
    enhancer: Enhancer,
}

impl EnhancePipeline {
    pub fn new(config: AppConfig) -> Self {
        let enhancer = Enhancer::new().parallel(config.parallel);
        Self { config, enhancer }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Enhance an already decoded image and encode it for delivery.
    pub fn enhance(
        &self,
        decoded: DecodedImage,
        options: EnhanceOptions,
    ) -> Result<EnhanceOutput, AppError> {
        let preset = options.preset.unwrap_or(self.config.preset);
        let format = options.format.unwrap_or(self.config.format);

        let result = self.enhancer.enhance(decoded.buffer, preset, format)?;
        let max_bit_depth = result.max_bit_depth;
        let enhanced = result.into_buffer();

        // Measured before the delivery resize, which would read as extra
        // sharpness and raise the quality
        let jpeg_quality = match format {
            OutputFormat::Jpg => Some(delivery::jpeg_quality(
                self.config.jpeg_quality,
                &self.enhancer.analyze(&enhanced),
            )),
            OutputFormat::Png => None,
        };

        let buffer = if options.keep_size {
            enhanced
        } else {
            delivery::fit_within(enhanced, self.config.max_width, self.config.max_height)?
        };

        let bytes = match jpeg_quality {
            Some(quality) => delivery::encode_jpeg(&buffer, quality)?,
            None => {
                let depth = decoded.bit_depth.min(max_bit_depth);
                delivery::encode_png(&buffer, depth, self.config.optimize_png)?
            }
        };

        tracing::info!(
            %preset,
            %format,
            width = buffer.width(),
            height = buffer.height(),
            bytes = bytes.len(),
            "Enhanced image"
        );

        Ok(EnhanceOutput {
            bytes,
            preset,
            format,
            width: buffer.width(),
            height: buffer.height(),
            jpeg_quality,
        })
    }

    /// Enhance `input` and write the result to `output`.
    ///
    /// Without an explicit format, a `.png`/`.jpg`/`.jpeg` extension on
    /// `output` decides, then the configuration.
    pub fn enhance_file(
        &self,
        input: &Path,
        output: &Path,
        mut options: EnhanceOptions,
    ) -> Result<EnhanceOutput, AppError> {
        if options.format.is_none() {
            options.format = format_from_extension(output);
        }
        let decoded = delivery::decode_file(input)?;
        let result = self.enhance(decoded, options)?;
        std::fs::write(output, &result.bytes)?;
        Ok(result)
    }

    pub fn analyze_file(&self, input: &Path) -> Result<AnalysisReport, AppError> {
        let decoded = delivery::decode_file(input)?;
        let v = self.enhancer.analyze(&decoded.buffer);
        Ok(AnalysisReport::new(
            decoded.buffer.width(),
            decoded.buffer.height(),
            decoded.bit_depth,
            &v,
        ))
    }

    pub fn plan_file(&self, input: &Path, preset: Option<PresetId>) -> Result<PlanReport, AppError> {
        let decoded = delivery::decode_file(input)?;
        let set = self
            .enhancer
            .plan(&decoded.buffer, preset.unwrap_or(self.config.preset))?;
        Ok(PlanReport::new(&set))
    }

    /// Write an unenhanced JPEG preview of `input`, longest side at most
    /// 1080 pixels, for before/after comparison.
    pub fn preview_file(&self, input: &Path, output: &Path) -> Result<(usize, usize), AppError> {
        let decoded = delivery::decode_file(input)?;
        let mut buffer = delivery::preview(decoded.buffer)?;
        buffer.clamp_samples();
        let bytes = delivery::encode_jpeg(&buffer, delivery::PREVIEW_QUALITY)?;
        std::fs::write(output, bytes)?;
        Ok((buffer.width(), buffer.height()))
    }
}

fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}
