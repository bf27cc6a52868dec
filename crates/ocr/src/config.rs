use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "RECEIPT_OCR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine settings. Recognition is English-only on the CPU unless `language`
/// is overridden.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code.
    pub language: String,
    /// Directory holding `tessdata`; `None` uses the engine's default lookup.
    pub data_path: Option<PathBuf>,
    /// Grayscale + contrast stretch before recognition.
    pub preprocess: bool,
    /// Longest edge in pixels; larger scans are downsampled.
    pub max_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            data_path: None,
            preprocess: true,
            max_dimension: 2800,
        }
    }
}

impl OcrConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `RECEIPT_OCR_CONFIG` if set, then apply `RECEIPT_OCR_*`
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(lang) = lookup("RECEIPT_OCR_LANGUAGE").filter(|v| !v.trim().is_empty()) {
            self.language = lang.trim().to_string();
        }
        if let Some(dir) = lookup("RECEIPT_OCR_TESSDATA").filter(|v| !v.is_empty()) {
            self.data_path = Some(PathBuf::from(dir));
        }
        if let Some(v) = parse_opt(&lookup, "RECEIPT_OCR_PREPROCESS") {
            self.preprocess = v;
        }
        if let Some(v) = parse_opt::<u32>(&lookup, "RECEIPT_OCR_MAX_DIMENSION") {
            if v == 0 {
                tracing::warn!("RECEIPT_OCR_MAX_DIMENSION must be positive. Ignoring.");
            } else {
                self.max_dimension = v;
            }
        }
    }
}

fn parse_opt<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let val = lookup(var)?;
    match val.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
            None
        }
    }
}
