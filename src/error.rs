//! Crate-wide error type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Schema has {schema} features but model expects {model}")]
    WidthMismatch { schema: usize, model: usize },

    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Model inference error: {0}")]
    ModelInference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChurnError>;

impl ChurnError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ChurnError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by a single bad request rather than the loaded model.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ChurnError::InvalidInput { .. })
    }
}
