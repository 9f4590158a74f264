//! Run configuration for the sequential host.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! input_dir = "data/raw"
//! output_dir = "out"
//! threshold = 0.2
//! strategies = ["drop", "impute"]
//! extension = "xlsx"
//! date_stamped_only = true
//! ```

use crate::error::{PipelineError, Result};
use crate::preprocessing::{CleaningStrategy, DEFAULT_MISSING_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory scanned for input spreadsheets.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Root for interim tables, cleaned tables, models and the run report.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Missing-value share above which `drop` removes a column.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Cleaning strategies to run, one branch each.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,
    /// Extension of the input files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Only read files whose name starts with a `YYYY-MM-DD` date.
    #[serde(default)]
    pub date_stamped_only: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_threshold() -> f64 {
    DEFAULT_MISSING_THRESHOLD
}

fn default_strategies() -> Vec<String> {
    CleaningStrategy::ALL
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_extension() -> String {
    "xlsx".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            threshold: default_threshold(),
            strategies: default_strategies(),
            extension: default_extension(),
            date_stamped_only: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PipelineError::config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parsed strategies, in configured order.
    pub fn strategies(&self) -> Result<Vec<CleaningStrategy>> {
        self.strategies.iter().map(|s| s.parse()).collect()
    }

    /// Checks the threshold range and the strategy names.
    pub fn validate(&self) -> Result<Vec<CleaningStrategy>> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        let strategies = self.strategies()?;
        if strategies.is_empty() {
            return Err(PipelineError::config("at least one strategy is required"));
        }
        Ok(strategies)
    }
}
