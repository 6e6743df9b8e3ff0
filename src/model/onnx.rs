//! ONNX Runtime inference for exported churn classifiers. Input: [1, width] f32,
//! Output: the first float tensor; for a [1, 2] probability output the positive
//! class is the last column.

use super::Scorer;
use crate::error::{ChurnError, Result};
use ndarray::{Array2, CowArray};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static ORT_ENV: OnceLock<Arc<Environment>> = OnceLock::new();

fn ort_err(e: impl std::fmt::Display) -> ChurnError {
    ChurnError::ModelInference(e.to_string())
}

fn init_env() -> Result<Arc<Environment>> {
    if let Some(env) = ORT_ENV.get() {
        return Ok(env.clone());
    }
    let env = Environment::builder()
        .with_name("churnshield")
        .build()
        .map_err(ort_err)?
        .into_arc();
    Ok(ORT_ENV.get_or_init(|| env).clone())
}

pub struct OnnxScorer {
    session: Session,
    width: Option<usize>,
}

impl OnnxScorer {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChurnError::ArtifactMissing(path.to_path_buf()));
        }
        let env = init_env()?;
        let session = SessionBuilder::new(&env)
            .map_err(ort_err)?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(ort_err)?
            .with_model_from_file(path)
            .map_err(ort_err)?;

        let width = session
            .inputs
            .first()
            .and_then(|i| i.dimensions.last().copied().flatten())
            .map(|d| d as usize);

        Ok(Self { session, width })
    }
}

impl Scorer for OnnxScorer {
    fn input_width(&self) -> Option<usize> {
        self.width
    }

    fn score(&self, values: &[f32]) -> Result<f32> {
        let arr = Array2::from_shape_vec((1, values.len()), values.to_vec()).map_err(ort_err)?;
        let input = CowArray::from(arr.into_dyn());
        let value = Value::from_array(self.session.allocator(), &input).map_err(ort_err)?;
        let outputs = self.session.run(vec![value]).map_err(ort_err)?;

        // label outputs are int64; the probabilities are the first float tensor
        for out in &outputs {
            let Ok(tensor) = out.try_extract::<f32>() else {
                continue;
            };
            let flat: Vec<f32> = tensor.view().iter().copied().collect();
            let score = match flat.len() {
                0 => continue,
                1 => flat[0],
                n => flat[n - 1],
            };
            return Ok(score);
        }
        Err(ChurnError::ModelInference(
            "model produced no float output".to_string(),
        ))
    }
}
