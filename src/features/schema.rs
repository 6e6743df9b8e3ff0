//! Ordered feature-name schema. Its order defines what each vector index means.

use super::encoder::ENCODED_KEYS;
use crate::error::{ChurnError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    names: Arc<[String]>,
    index: Arc<HashMap<String, usize>>,
}

impl FeatureSchema {
    /// Build from names in model order. Duplicate names are rejected since the
    /// projection would silently lose a column.
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ChurnError::SchemaMismatch(format!(
                    "duplicate feature name {name:?}"
                )));
            }
        }
        Ok(Self {
            names: names.into(),
            index: Arc::new(index),
        })
    }

    /// Load a JSON array of strings. An empty schema cannot serve predictions.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChurnError::ArtifactMissing(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let names: Vec<String> = serde_json::from_str(&data)?;
        if names.is_empty() {
            return Err(ChurnError::SchemaMismatch(format!(
                "schema {} lists no features",
                path.display()
            )));
        }
        Self::new(names)
    }

    /// Every key the encoder produces, in the encoder's own order.
    pub fn encoder_default() -> Self {
        let names: Vec<String> = ENCODED_KEYS.iter().map(|k| k.to_string()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names: names.into(),
            index: Arc::new(index),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
