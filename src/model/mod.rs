//! Pre-trained churn model: artifact loading and scoring backends.
//!
//! - [`xgboost`] — native evaluator for XGBoost JSON boosters
//! - [`onnx`] — ONNX Runtime session for exported models
//! - [`predictor`] — the immutable handle pairing a scorer with its schema

pub mod onnx;
pub mod predictor;
pub mod xgboost;

pub use onnx::OnnxScorer;
pub use predictor::{ModelInfo, Predictor};
pub use xgboost::XgbBooster;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized model format. `Auto` picks ONNX for `.onnx` files, XGBoost JSON otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    #[default]
    Auto,
    XgboostJson,
    Onnx,
}

impl ModelFormat {
    pub fn resolve(self, path: &Path) -> ModelFormat {
        match self {
            ModelFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("onnx") => ModelFormat::Onnx,
                _ => ModelFormat::XgboostJson,
            },
            other => other,
        }
    }
}

/// A loaded binary classifier returning the positive-class probability.
pub trait Scorer: Send + Sync {
    /// Number of input features, when the artifact declares it.
    fn input_width(&self) -> Option<usize>;

    /// Feature names embedded in the artifact, if any.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Per-feature split counts, for tree models that expose their structure.
    fn split_counts(&self) -> Option<Vec<u32>> {
        None
    }

    fn score(&self, values: &[f32]) -> Result<f32>;
}
