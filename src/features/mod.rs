//! Feature encoding: customer profile → fixed-order numeric vector.

mod encoder;
mod schema;

pub use encoder::{encode, encode_raw, AddOnIndicator, FeatureEncoder, ENCODED_KEYS};
pub use schema::FeatureSchema;

use serde::Serialize;

/// Model input in schema order. Built per prediction, never retained.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    pub dim: usize,
    pub values: Vec<f32>,
    pub customer_id: String,
    pub ts: i64,
    #[serde(skip)]
    pub schema: FeatureSchema,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.dim.min(self.values.len())]
    }

    /// Value of a named feature, if the schema has it.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.schema
            .index_of(name)
            .and_then(|i| self.values.get(i).copied())
    }
}
