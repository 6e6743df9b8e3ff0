//! Raw profile input as it arrives from a form or JSON line, and its validation
//! into a [`CustomerProfile`].

use super::{AddOnService, AddOns, CustomerProfile, Gender};
use crate::error::{ChurnError, Result};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive numeric range accepted for one profile field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const TENURE_MONTHS: Bounds = Bounds { field: "tenure", min: 0.0, max: 72.0 };
pub const MONTHLY_CHARGES: Bounds = Bounds { field: "monthly_charges", min: 18.0, max: 120.0 };
pub const TOTAL_CHARGES: Bounds = Bounds { field: "total_charges", min: 0.0, max: 9000.0 };

/// What to do with a numeric value outside its [`Bounds`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    #[default]
    Reject,
    Clamp,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn check(&self, value: f64, policy: OutOfRangePolicy) -> Result<f64> {
        if !value.is_finite() {
            return Err(ChurnError::invalid(self.field, format!("{value} is not a finite number")));
        }
        if self.contains(value) {
            return Ok(value);
        }
        match policy {
            OutOfRangePolicy::Reject => Err(ChurnError::invalid(
                self.field,
                format!("{value} outside [{}, {}]", self.min, self.max),
            )),
            OutOfRangePolicy::Clamp => {
                let clamped = value.clamp(self.min, self.max);
                tracing::debug!(field = self.field, value, clamped, "clamped out-of-range input");
                Ok(clamped)
            }
        }
    }
}

/// Unvalidated profile. Fields missing from JSON take the dashboard's widget defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub customer_id: String,
    pub join_date: NaiveDate,
    pub gender: String,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure: f64,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub paperless_billing: bool,
    pub phone_service: bool,
    pub contract: String,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub payment_method: String,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            customer_id: "Mohd Shami".to_string(),
            join_date: Utc::now().date_naive() - Duration::days(365),
            gender: "Male".to_string(),
            senior_citizen: false,
            partner: false,
            dependents: false,
            tenure: 12.0,
            monthly_charges: 70.0,
            total_charges: 1000.0,
            paperless_billing: true,
            phone_service: true,
            contract: "Month-to-month".to_string(),
            internet_service: "Fiber optic".to_string(),
            online_security: "Yes".to_string(),
            online_backup: "Yes".to_string(),
            device_protection: "Yes".to_string(),
            tech_support: "Yes".to_string(),
            streaming_tv: "Yes".to_string(),
            streaming_movies: "Yes".to_string(),
            payment_method: "Electronic check".to_string(),
        }
    }
}

impl ProfileInput {
    /// Check every categorical value against its domain and every numeric value
    /// against its bounds. Nothing invalid gets past this point.
    pub fn validate(&self, policy: OutOfRangePolicy) -> Result<CustomerProfile> {
        let tenure = TENURE_MONTHS.check(self.tenure, policy)?;
        if tenure.fract() != 0.0 {
            return Err(ChurnError::invalid(
                TENURE_MONTHS.field,
                format!("{tenure} is not a whole number of months"),
            ));
        }

        let add_ons = AddOns {
            online_security: AddOnService::OnlineSecurity.parse_option(&self.online_security)?,
            online_backup: AddOnService::OnlineBackup.parse_option(&self.online_backup)?,
            device_protection: AddOnService::DeviceProtection.parse_option(&self.device_protection)?,
            tech_support: AddOnService::TechSupport.parse_option(&self.tech_support)?,
            streaming_tv: AddOnService::StreamingTv.parse_option(&self.streaming_tv)?,
            streaming_movies: AddOnService::StreamingMovies.parse_option(&self.streaming_movies)?,
        };

        Ok(CustomerProfile {
            customer_id: self.customer_id.clone(),
            join_date: self.join_date,
            gender: self.gender.parse::<Gender>()?,
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            tenure_months: tenure as u32,
            monthly_charges: MONTHLY_CHARGES.check(self.monthly_charges, policy)?,
            total_charges: TOTAL_CHARGES.check(self.total_charges, policy)?,
            paperless_billing: self.paperless_billing,
            phone_service: self.phone_service,
            contract: self.contract.parse()?,
            internet_service: self.internet_service.parse()?,
            add_ons,
            payment_method: self.payment_method.parse()?,
        })
    }
}
