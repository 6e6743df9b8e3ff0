//! Native evaluator for boosters saved with XGBoost's `save_model("*.json")`.
//!
//! Only what a binary churn classifier needs is supported: `gbtree` boosters with
//! numerical splits and a logistic objective. Anything else is refused at load
//! time so a bad artifact never reaches the first prediction.

use super::Scorer;
use crate::error::{ChurnError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
}

#[derive(Deserialize)]
struct LearnerDocument {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterDocument,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDocument,
}

#[derive(Deserialize)]
struct BoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<GbtreeDocument>,
}

#[derive(Deserialize)]
struct GbtreeDocument {
    trees: Vec<TreeDocument>,
}

#[derive(Deserialize)]
struct TreeDocument {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// 1.x writes `default_left` as 0/1 integers, some writers use booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(i) => *i != 0,
        }
    }
}

#[derive(Deserialize)]
struct LearnerModelParam {
    base_score: String,
    num_feature: String,
    #[serde(default)]
    num_class: Option<String>,
}

#[derive(Deserialize)]
struct ObjectiveDocument {
    name: String,
}

const LEAF: i32 = -1;

#[derive(Debug, Clone)]
struct Node {
    left: i32,
    right: i32,
    feature: u32,
    /// Split threshold for internal nodes, leaf value for leaves.
    value: f32,
    default_left: bool,
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_document(doc: TreeDocument, tree_id: usize, num_feature: usize) -> Result<Self> {
        let n = doc.left_children.len();
        if n == 0
            || doc.right_children.len() != n
            || doc.split_indices.len() != n
            || doc.split_conditions.len() != n
            || doc.default_left.len() != n
        {
            return Err(ChurnError::UnsupportedModel(format!(
                "tree {tree_id}: node arrays are empty or of unequal length"
            )));
        }
        if doc.split_type.iter().any(|&t| t != 0) {
            return Err(ChurnError::UnsupportedModel(format!(
                "tree {tree_id}: categorical splits are not supported"
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (doc.left_children[i], doc.right_children[i]);
            let feature = doc.split_indices[i];
            if left == LEAF {
                if right != LEAF {
                    return Err(ChurnError::UnsupportedModel(format!(
                        "tree {tree_id}: node {i} has only one child"
                    )));
                }
            } else {
                // children always follow their parent, which also rules out cycles
                let in_range = |c: i32| c > i as i32 && (c as usize) < n;
                if !in_range(left) || !in_range(right) {
                    return Err(ChurnError::UnsupportedModel(format!(
                        "tree {tree_id}: node {i} has invalid children ({left}, {right})"
                    )));
                }
                if feature as usize >= num_feature {
                    return Err(ChurnError::UnsupportedModel(format!(
                        "tree {tree_id}: node {i} splits on feature {feature} of {num_feature}"
                    )));
                }
            }
            nodes.push(Node {
                left,
                right,
                feature,
                value: doc.split_conditions[i],
                default_left: doc.default_left[i].is_set(),
            });
        }
        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.left == LEAF {
                return node.value;
            }
            let x = row[node.feature as usize];
            let go_left = if x.is_nan() { node.default_left } else { x < node.value };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }
}

/// Gradient-boosted trees with a logistic link.
#[derive(Debug, Clone)]
pub struct XgbBooster {
    trees: Vec<Tree>,
    base_margin: f32,
    num_feature: usize,
    feature_names: Vec<String>,
}

fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    // 2.x wraps scalars in brackets, e.g. "[5E-1]"
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    trimmed
        .parse::<T>()
        .map_err(|_| ChurnError::UnsupportedModel(format!("unparsable {name}: {raw:?}")))
}

impl XgbBooster {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChurnError::ArtifactMissing(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        Self::from_json_slice(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Self::from_json_slice(data.as_bytes())
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_slice(data)?;
        let learner = doc.learner;

        let objective = learner.objective.name.as_str();
        if objective != "binary:logistic" && objective != "reg:logistic" {
            return Err(ChurnError::UnsupportedModel(format!(
                "objective {objective:?} does not yield a probability"
            )));
        }
        if let Some(raw) = learner.learner_model_param.num_class.as_deref() {
            let num_class: usize = parse_param("num_class", raw)?;
            if num_class > 1 {
                return Err(ChurnError::UnsupportedModel(format!(
                    "{num_class}-class model; expected a binary classifier"
                )));
            }
        }
        if learner.gradient_booster.name != "gbtree" {
            return Err(ChurnError::UnsupportedModel(format!(
                "booster {:?}; only gbtree is supported",
                learner.gradient_booster.name
            )));
        }
        let model = learner.gradient_booster.model.ok_or_else(|| {
            ChurnError::UnsupportedModel("gbtree booster without a model section".to_string())
        })?;

        let num_feature: usize = parse_param("num_feature", &learner.learner_model_param.num_feature)?;
        let base_score: f32 = parse_param("base_score", &learner.learner_model_param.base_score)?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(ChurnError::UnsupportedModel(format!(
                "base_score {base_score} outside (0, 1)"
            )));
        }

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(id, t)| Tree::from_document(t, id, num_feature))
            .collect::<Result<Vec<_>>>()?;

        if !learner.feature_names.is_empty() && learner.feature_names.len() != num_feature {
            return Err(ChurnError::UnsupportedModel(format!(
                "model lists {} feature names for {num_feature} features",
                learner.feature_names.len()
            )));
        }

        Ok(Self {
            trees,
            base_margin: (base_score / (1.0 - base_score)).ln(),
            num_feature,
            feature_names: learner.feature_names,
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw log-odds before the logistic link. `row` must be exactly `num_feature` wide.
    pub fn margin(&self, row: &[f32]) -> Result<f32> {
        if row.len() != self.num_feature {
            return Err(ChurnError::ModelInference(format!(
                "got {} features, booster expects {}",
                row.len(),
                self.num_feature
            )));
        }
        Ok(self.base_margin + self.trees.iter().map(|t| t.leaf_value(row)).sum::<f32>())
    }
}

impl Scorer for XgbBooster {
    fn input_width(&self) -> Option<usize> {
        Some(self.num_feature)
    }

    fn feature_names(&self) -> Option<&[String]> {
        if self.feature_names.is_empty() {
            None
        } else {
            Some(&self.feature_names)
        }
    }

    fn split_counts(&self) -> Option<Vec<u32>> {
        let mut counts = vec![0u32; self.num_feature];
        for node in self.trees.iter().flat_map(|t| t.nodes.iter()) {
            if node.left != LEAF {
                counts[node.feature as usize] += 1;
            }
        }
        Some(counts)
    }

    fn score(&self, values: &[f32]) -> Result<f32> {
        let margin = self.margin(values)?;
        Ok(1.0 / (1.0 + (-margin).exp()))
    }
}
