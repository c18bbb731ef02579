pub mod enhance_pipeline;

pub use enhance_pipeline::{EnhanceOptions, EnhanceOutput, EnhancePipeline};
