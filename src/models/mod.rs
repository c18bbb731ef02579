pub mod config;
pub mod report;

pub use config::{AppConfig, JpegQuality, CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use report::{AnalysisReport, PlanParam, PlanReport, PlanStep, PresetSummary};
