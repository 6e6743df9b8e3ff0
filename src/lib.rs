//! ChurnShield — customer churn risk scoring.
//!
//! Modular structure:
//! - [`profile`] — Customer attributes and input validation
//! - [`features`] — Profile → fixed-order feature vector
//! - [`model`] — Boosted-tree model loading and inference
//! - [`risk`] — Probability → risk tier
//! - [`impact`] — Key-factor heuristic for the narrative panel
//! - [`retention`] — Tier-keyed retention playbooks
//! - [`pipeline`] — One synchronous evaluation per input change
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod profile;
pub mod features;
pub mod model;
pub mod risk;
pub mod impact;
pub mod retention;
pub mod pipeline;
pub mod logging;

pub use config::ChurnConfig;
pub use error::{ChurnError, Result};
pub use profile::{CustomerProfile, ProfileInput};
pub use features::{encode, FeatureEncoder, FeatureSchema, FeatureVector};
pub use model::Predictor;
pub use risk::{classify, RiskAssessment, RiskEngine, RiskTier};
pub use impact::{impacts, FeatureImpacts, ImpactFactor};
pub use pipeline::{ChurnPipeline, ChurnReport, RunStats};
pub use logging::StructuredLogger;
