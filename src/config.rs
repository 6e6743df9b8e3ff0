//! Scorer configuration: model artifacts, risk thresholds, input policy, logging.

use crate::error::{ChurnError, Result};
use crate::model::ModelFormat;
use crate::profile::OutOfRangePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChurnConfig {
    /// Model and feature-name schema artifacts
    pub model: ModelConfig,
    /// Risk tier thresholds
    pub risk: RiskConfig,
    /// Handling of raw profile input
    pub input: InputConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Serialized boosted-tree model (XGBoost JSON or ONNX)
    pub model_path: PathBuf,
    /// JSON array of feature names, in the order the model expects
    pub schema_path: PathBuf,
    pub format: ModelFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Probability strictly above this is high risk (0.0–1.0)
    pub high_threshold: f64,
    /// Probability strictly above this is medium risk
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub out_of_range: OutOfRangePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/churn_model.json"),
            schema_path: PathBuf::from("model/feature_names.json"),
            format: ModelFormat::Auto,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.7,
            medium_threshold: 0.4,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<()> {
        let (medium, high) = (self.medium_threshold, self.high_threshold);
        if !(0.0..=1.0).contains(&medium) || !(0.0..=1.0).contains(&high) {
            return Err(ChurnError::Config(format!(
                "risk thresholds must lie in [0, 1] (medium={medium}, high={high})"
            )));
        }
        if medium >= high {
            return Err(ChurnError::Config(format!(
                "medium threshold {medium} must be below high threshold {high}"
            )));
        }
        Ok(())
    }
}

impl ChurnConfig {
    /// Load from JSON file if present; otherwise return default.
    /// An unreadable or unparsable file is an error.
    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Like [`ChurnConfig::try_load`], but falls back to defaults with a warning.
    /// The warning is only visible once a subscriber is installed.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "config unreadable; using defaults");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.risk.validate()
    }
}
