//! Risk tiers from churn probability.

mod engine;

pub use engine::{classify, RiskAssessment, RiskEngine, RiskTier};
