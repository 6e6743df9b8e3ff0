//! Maps a churn probability to a risk tier with strict greater-than thresholds.

use crate::config::RiskConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// `> high` is HIGH, `> medium` is MEDIUM, anything else LOW.
    pub fn from_probability(probability: f64, config: &RiskConfig) -> Self {
        if probability > config.high_threshold {
            RiskTier::High
        } else if probability > config.medium_threshold {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskTier::High => "Immediate action required",
            RiskTier::Medium => "Proactive measures recommended",
            RiskTier::Low => "Normal monitoring",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::High => "HIGH",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Low => "LOW",
        }
    }
}

/// Classification of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tier: RiskTier,
    pub description: String,
}

/// Classify with the default 0.7 / 0.4 thresholds.
pub fn classify(probability: f64) -> (RiskTier, &'static str) {
    let tier = RiskTier::from_probability(probability, &RiskConfig::default());
    (tier, tier.description())
}

#[derive(Debug, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn assess(&self, probability: f64) -> RiskAssessment {
        let tier = RiskTier::from_probability(probability, &self.config);
        RiskAssessment {
            probability,
            tier,
            description: tier.description().to_string(),
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}
