//! Key-factor scores for the narrative panel. These are fixed per-field rules on
//! the raw profile and do not read the trained model; see
//! [`Predictor::feature_importance`](crate::model::Predictor::feature_importance)
//! for attribution derived from the model itself.

use crate::profile::{Contract, CustomerProfile, InternetService, PaymentMethod, ServiceOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactFactor {
    #[serde(rename = "Contract Type")]
    ContractType,
    #[serde(rename = "Internet Service")]
    InternetService,
    Tenure,
    #[serde(rename = "Online Security")]
    OnlineSecurity,
    #[serde(rename = "Tech Support")]
    TechSupport,
    #[serde(rename = "Payment Method")]
    PaymentMethod,
    #[serde(rename = "Monthly Charges")]
    MonthlyCharges,
}

impl ImpactFactor {
    pub const ALL: [ImpactFactor; 7] = [
        ImpactFactor::ContractType,
        ImpactFactor::InternetService,
        ImpactFactor::Tenure,
        ImpactFactor::OnlineSecurity,
        ImpactFactor::TechSupport,
        ImpactFactor::PaymentMethod,
        ImpactFactor::MonthlyCharges,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImpactFactor::ContractType => "Contract Type",
            ImpactFactor::InternetService => "Internet Service",
            ImpactFactor::Tenure => "Tenure",
            ImpactFactor::OnlineSecurity => "Online Security",
            ImpactFactor::TechSupport => "Tech Support",
            ImpactFactor::PaymentMethod => "Payment Method",
            ImpactFactor::MonthlyCharges => "Monthly Charges",
        }
    }

    /// Signed score: positive raises churn risk, negative lowers it.
    pub fn score(self, profile: &CustomerProfile) -> f64 {
        match self {
            ImpactFactor::ContractType => match profile.contract {
                Contract::MonthToMonth => 0.35,
                Contract::TwoYear => -0.15,
                Contract::OneYear => -0.05,
            },
            ImpactFactor::InternetService => match profile.internet_service {
                InternetService::FiberOptic => 0.25,
                InternetService::Dsl => -0.10,
                InternetService::No => 0.0,
            },
            ImpactFactor::Tenure => -0.02 * f64::from(profile.tenure_months),
            ImpactFactor::OnlineSecurity => match profile.add_ons.online_security {
                ServiceOption::Yes => -0.15,
                ServiceOption::No => 0.10,
                ServiceOption::NoInternetService => 0.0,
            },
            ImpactFactor::TechSupport => match profile.add_ons.tech_support {
                ServiceOption::Yes => -0.18,
                ServiceOption::No => 0.10,
                ServiceOption::NoInternetService => 0.0,
            },
            ImpactFactor::PaymentMethod => match profile.payment_method {
                PaymentMethod::ElectronicCheck => 0.12,
                m if m.is_automatic() => -0.08,
                _ => 0.0,
            },
            ImpactFactor::MonthlyCharges => 0.005 * profile.monthly_charges,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDirection {
    Increasing,
    Reducing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub factor: ImpactFactor,
    pub score: f64,
}

impl FeatureImpact {
    /// Zero counts as reducing, matching how the panel has always rendered it.
    pub fn direction(&self) -> ImpactDirection {
        if self.score > 0.0 {
            ImpactDirection::Increasing
        } else {
            ImpactDirection::Reducing
        }
    }

    pub fn narrative(&self) -> String {
        let verb = match self.direction() {
            ImpactDirection::Increasing => "Increasing",
            ImpactDirection::Reducing => "Reducing",
        };
        format!("{}: {verb} churn risk (Impact: {:.2})", self.factor.label(), self.score)
    }
}

/// All factor scores for one profile, in [`ImpactFactor::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureImpacts {
    entries: Vec<FeatureImpact>,
}

pub fn impacts(profile: &CustomerProfile) -> FeatureImpacts {
    FeatureImpacts {
        entries: ImpactFactor::ALL
            .iter()
            .map(|&factor| FeatureImpact {
                factor,
                score: factor.score(profile),
            })
            .collect(),
    }
}

impl FeatureImpacts {
    pub fn get(&self, factor: ImpactFactor) -> Option<f64> {
        self.entries.iter().find(|e| e.factor == factor).map(|e| e.score)
    }

    pub fn entries(&self) -> &[FeatureImpact] {
        &self.entries
    }

    /// Descending by signed score (bar chart order).
    pub fn by_value(&self) -> Vec<FeatureImpact> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
        sorted
    }

    /// Descending by magnitude (textual breakdown order).
    pub fn by_magnitude(&self) -> Vec<FeatureImpact> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
        sorted
    }

    pub fn narrative(&self) -> Vec<String> {
        self.by_magnitude().iter().map(FeatureImpact::narrative).collect()
    }
}
