//! The loaded model and its feature schema, validated against each other once at
//! start-up and shared read-only by every evaluation.

use super::{ModelFormat, OnnxScorer, Scorer, XgbBooster};
use crate::config::ModelConfig;
use crate::error::{ChurnError, Result};
use crate::features::{FeatureSchema, FeatureVector};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::info;

/// Provenance of the loaded artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub format: ModelFormat,
    pub path: Option<PathBuf>,
    pub sha256: Option<String>,
    pub input_width: usize,
}

pub struct Predictor {
    scorer: Box<dyn Scorer>,
    schema: FeatureSchema,
    info: ModelInfo,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("schema_len", &self.schema.len())
            .field("info", &self.info)
            .finish()
    }
}

impl Predictor {
    /// Load model and schema artifacts. Any failure here means the process cannot
    /// serve predictions.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        for path in [&config.model_path, &config.schema_path] {
            if !path.exists() {
                return Err(ChurnError::ArtifactMissing(path.clone()));
            }
        }
        let schema = FeatureSchema::load(&config.schema_path)?;

        let format = config.format.resolve(&config.model_path);
        let bytes = std::fs::read(&config.model_path)?;
        let sha256 = format!("{:x}", Sha256::digest(&bytes));
        let scorer: Box<dyn Scorer> = match format {
            ModelFormat::Onnx => Box::new(OnnxScorer::load(&config.model_path)?),
            ModelFormat::XgboostJson | ModelFormat::Auto => Box::new(XgbBooster::from_json_slice(&bytes)?),
        };

        let predictor = Self::assemble(
            scorer,
            schema,
            ModelInfo {
                format,
                path: Some(config.model_path.clone()),
                sha256: Some(sha256),
                input_width: 0,
            },
        )?;
        info!(
            path = %config.model_path.display(),
            format = ?predictor.info.format,
            features = predictor.schema.len(),
            sha256 = predictor.info.sha256.as_deref().unwrap_or_default(),
            "model loaded"
        );
        Ok(predictor)
    }

    /// Pair an already-built scorer with a schema, applying the same checks as [`Predictor::load`].
    pub fn new(scorer: Box<dyn Scorer>, schema: FeatureSchema) -> Result<Self> {
        Self::assemble(
            scorer,
            schema,
            ModelInfo {
                format: ModelFormat::Auto,
                path: None,
                sha256: None,
                input_width: 0,
            },
        )
    }

    fn assemble(scorer: Box<dyn Scorer>, schema: FeatureSchema, mut info: ModelInfo) -> Result<Self> {
        if schema.is_empty() {
            return Err(ChurnError::SchemaMismatch("schema lists no features".to_string()));
        }
        if let Some(width) = scorer.input_width() {
            if width != schema.len() {
                return Err(ChurnError::WidthMismatch {
                    schema: schema.len(),
                    model: width,
                });
            }
        }
        if let Some(names) = scorer.feature_names() {
            if let Some(pos) = names.iter().zip(schema.names()).position(|(m, s)| m != s) {
                return Err(ChurnError::SchemaMismatch(format!(
                    "feature {pos} is {:?} in the model but {:?} in the schema",
                    names[pos],
                    schema.names()[pos]
                )));
            }
        }
        info.input_width = schema.len();
        Ok(Self { scorer, schema, info })
    }

    /// Churn probability in [0, 1] for a vector encoded against this predictor's schema.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.dim != self.schema.len() || features.values.len() != self.schema.len() {
            return Err(ChurnError::SchemaMismatch(format!(
                "vector has {} values, schema has {}",
                features.values.len(),
                self.schema.len()
            )));
        }
        let score = self.scorer.score(features.as_slice())?;
        if !score.is_finite() {
            return Err(ChurnError::ModelInference(format!("non-finite score {score}")));
        }
        Ok(f64::from(score).clamp(0.0, 1.0))
    }

    /// Split-count importance per schema feature, normalised to sum to 1 and
    /// sorted descending. `None` when the backend does not expose its trees.
    pub fn feature_importance(&self) -> Option<Vec<(String, f64)>> {
        let counts = self.scorer.split_counts()?;
        let total: u32 = counts.iter().sum();
        if total == 0 {
            return Some(Vec::new());
        }
        let mut ranked: Vec<(String, f64)> = self
            .schema
            .names()
            .iter()
            .zip(counts)
            .filter(|(_, c)| *c > 0)
            .map(|(name, c)| (name.clone(), f64::from(c) / f64::from(total)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Some(ranked)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}
