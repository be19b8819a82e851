use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON settings file.
pub const CONFIG_ENV: &str = "FINDEX_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_ENV: &str = "FINDEX_DATA";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a settings file only needs
/// the keys it changes:
///
/// ```json
/// { "data_path": "/data/findex_2021.csv", "window_size": [1400.0, 900.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data_cleaned.csv"),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
        }
    }
}

impl AppConfig {
    /// Resolve settings: defaults, then the `FINDEX_CONFIG` file, then
    /// `FINDEX_DATA`, then the first positional argument.
    pub fn resolve() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        if let Some(arg) = std::env::args_os().nth(1) {
            config.data_path = PathBuf::from(arg);
        }
        log::debug!("resolved configuration: {config:?}");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
