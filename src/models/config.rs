use crate::error::AppError;
use photo_enhance::{OutputFormat, PresetId};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "RAWTONE_CONFIG";

/// Config file picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "rawtone.yaml";

/// Application configuration loaded from rawtone.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Preset used when the command line names none
    #[serde(default, deserialize_with = "parse_str")]
    pub preset: PresetId,

    /// Output format used when the command line names none
    #[serde(default, deserialize_with = "parse_str")]
    pub format: OutputFormat,

    /// Row-parallel processing inside the enhancer
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Delivery box; larger results are scaled down to fit
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    #[serde(default = "default_max_height")]
    pub max_height: u32,

    #[serde(default)]
    pub jpeg_quality: JpegQuality,

    /// Re-compress PNG output with oxipng
    #[serde(default = "default_true")]
    pub optimize_png: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_width() -> u32 {
    1080
}

fn default_max_height() -> u32 {
    1920
}

/// JPEG quality: derived from the image, or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JpegQuality {
    #[default]
    Auto,
    Fixed(u8),
}

impl<'de> Deserialize<'de> for JpegQuality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(q @ 1..=100) => Ok(JpegQuality::Fixed(q as u8)),
            Raw::Text(s) if s.eq_ignore_ascii_case("auto") => Ok(JpegQuality::Auto),
            Raw::Number(q) => Err(serde::de::Error::custom(format!(
                "jpeg_quality {q} out of range 1-100"
            ))),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "jpeg_quality must be `auto` or 1-100, got `{s}`"
            ))),
        }
    }
}

fn parse_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Looks at `explicit` (from `--config`), then `$RAWTONE_CONFIG`, then
    /// `rawtone.yaml` in the working directory. An explicitly named file that
    /// cannot be read or parsed is an error; a broken `rawtone.yaml` only
    /// produces a warning and the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::load_optional(Path::new(DEFAULT_CONFIG_FILE))),
        }
    }

    /// Load a file that must exist and parse.
    pub fn load_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|message| AppError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::info!(path = %path.display(), preset = %config.preset, "Loaded configuration");
        Ok(config)
    }

    /// Load a file that may be absent or broken, falling back to defaults.
    pub fn load_optional(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                return Self::default();
            }
        };
        match Self::parse(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), preset = %config.preset, "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML and check the values serde cannot.
    pub fn parse(content: &str) -> Result<Self, String> {
        // An empty file is a valid, empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        if config.max_width == 0 || config.max_height == 0 {
            return Err(format!(
                "delivery box {}x{} has zero area",
                config.max_width, config.max_height
            ));
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: PresetId::default(),
            format: OutputFormat::default(),
            parallel: true,
            max_width: default_max_width(),
            max_height: default_max_height(),
            jpeg_quality: JpegQuality::Auto,
            optimize_png: true,
        }
    }
}
