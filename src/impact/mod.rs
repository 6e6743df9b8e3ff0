//! Key-factor impact heuristic shown alongside a prediction.

mod heuristic;

pub use heuristic::{impacts, FeatureImpact, FeatureImpacts, ImpactDirection, ImpactFactor};
