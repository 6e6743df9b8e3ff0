//! Customer profile: the validated record the encoder and impact heuristic consume.

mod categorical;
mod input;

pub use categorical::{AddOnService, Contract, Gender, InternetService, PaymentMethod, ServiceOption};
pub use input::{Bounds, OutOfRangePolicy, ProfileInput, MONTHLY_CHARGES, TENURE_MONTHS, TOTAL_CHARGES};

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Options chosen for each add-on service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOns {
    pub online_security: ServiceOption,
    pub online_backup: ServiceOption,
    pub device_protection: ServiceOption,
    pub tech_support: ServiceOption,
    pub streaming_tv: ServiceOption,
    pub streaming_movies: ServiceOption,
}

impl AddOns {
    pub fn uniform(option: ServiceOption) -> Self {
        Self {
            online_security: option,
            online_backup: option,
            device_protection: option,
            tech_support: option,
            streaming_tv: option,
            streaming_movies: option,
        }
    }

    pub fn get(&self, service: AddOnService) -> ServiceOption {
        match service {
            AddOnService::OnlineSecurity => self.online_security,
            AddOnService::OnlineBackup => self.online_backup,
            AddOnService::DeviceProtection => self.device_protection,
            AddOnService::TechSupport => self.tech_support,
            AddOnService::StreamingTv => self.streaming_tv,
            AddOnService::StreamingMovies => self.streaming_movies,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddOnService, ServiceOption)> + '_ {
        AddOnService::ALL.iter().map(move |&s| (s, self.get(s)))
    }
}

/// A validated customer record. Numeric fields are within [`TENURE_MONTHS`],
/// [`MONTHLY_CHARGES`] and [`TOTAL_CHARGES`] when built through
/// [`ProfileInput::validate`]; the encoder re-checks them via
/// [`CustomerProfile::check_bounds`] for hand-built records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub join_date: NaiveDate,
    pub gender: Gender,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub tenure_months: u32,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub paperless_billing: bool,
    pub phone_service: bool,
    pub contract: Contract,
    pub internet_service: InternetService,
    pub add_ons: AddOns,
    pub payment_method: PaymentMethod,
}

impl CustomerProfile {
    /// Reject numeric fields outside their bounds without clamping.
    pub fn check_bounds(&self) -> Result<()> {
        TENURE_MONTHS.check(f64::from(self.tenure_months), OutOfRangePolicy::Reject)?;
        MONTHLY_CHARGES.check(self.monthly_charges, OutOfRangePolicy::Reject)?;
        TOTAL_CHARGES.check(self.total_charges, OutOfRangePolicy::Reject)?;
        Ok(())
    }
}
