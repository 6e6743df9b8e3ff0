//! Profile → model-ready vector: numeric fields verbatim, flags as 0/1, categorical
//! fields one-hot, then zero-fill and projection onto the schema order.

use super::{FeatureSchema, FeatureVector};
use crate::error::{ChurnError, Result};
use crate::profile::{AddOnService, Contract, CustomerProfile, Gender, InternetService, PaymentMethod, ServiceOption};
use chrono::Utc;
use std::collections::HashMap;

/// Every key [`encode_raw`] emits, in emission order.
pub const ENCODED_KEYS: [&str; 31] = [
    "tenure",
    "MonthlyCharges",
    "TotalCharges",
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "PhoneService",
    "PaperlessBilling",
    "Contract_Month-to-month",
    "Contract_One year",
    "Contract_Two year",
    "InternetService_Fiber optic",
    "InternetService_DSL",
    "InternetService_No",
    "OnlineSecurity_Yes",
    "OnlineSecurity_No internet service",
    "OnlineBackup_Yes",
    "OnlineBackup_No internet service",
    "DeviceProtection_Yes",
    "DeviceProtection_No internet service",
    "TechSupport_Yes",
    "TechSupport_No internet service",
    "StreamingTV_Yes",
    "StreamingTV_No internet service",
    "StreamingMovies_Yes",
    "StreamingMovies_No internet service",
    "PaymentMethod_Electronic check",
    "PaymentMethod_Mailed check",
    "PaymentMethod_Bank transfer (automatic)",
    "PaymentMethod_Credit card (automatic)",
];

/// Indicator an add-on option switches on. "No" is the baseline and has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOnIndicator {
    Yes,
    NoInternetService,
}

impl ServiceOption {
    pub fn indicator(self) -> Option<AddOnIndicator> {
        match self {
            ServiceOption::Yes => Some(AddOnIndicator::Yes),
            ServiceOption::No => None,
            ServiceOption::NoInternetService => Some(AddOnIndicator::NoInternetService),
        }
    }
}

fn contract_key(contract: Contract) -> &'static str {
    match contract {
        Contract::MonthToMonth => "Contract_Month-to-month",
        Contract::OneYear => "Contract_One year",
        Contract::TwoYear => "Contract_Two year",
    }
}

fn internet_key(service: InternetService) -> &'static str {
    match service {
        InternetService::FiberOptic => "InternetService_Fiber optic",
        InternetService::Dsl => "InternetService_DSL",
        InternetService::No => "InternetService_No",
    }
}

fn add_on_key(service: AddOnService, indicator: AddOnIndicator) -> &'static str {
    use AddOnIndicator::{NoInternetService as Nis, Yes};
    match (service, indicator) {
        (AddOnService::OnlineSecurity, Yes) => "OnlineSecurity_Yes",
        (AddOnService::OnlineSecurity, Nis) => "OnlineSecurity_No internet service",
        (AddOnService::OnlineBackup, Yes) => "OnlineBackup_Yes",
        (AddOnService::OnlineBackup, Nis) => "OnlineBackup_No internet service",
        (AddOnService::DeviceProtection, Yes) => "DeviceProtection_Yes",
        (AddOnService::DeviceProtection, Nis) => "DeviceProtection_No internet service",
        (AddOnService::TechSupport, Yes) => "TechSupport_Yes",
        (AddOnService::TechSupport, Nis) => "TechSupport_No internet service",
        (AddOnService::StreamingTv, Yes) => "StreamingTV_Yes",
        (AddOnService::StreamingTv, Nis) => "StreamingTV_No internet service",
        (AddOnService::StreamingMovies, Yes) => "StreamingMovies_Yes",
        (AddOnService::StreamingMovies, Nis) => "StreamingMovies_No internet service",
    }
}

fn payment_key(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::ElectronicCheck => "PaymentMethod_Electronic check",
        PaymentMethod::MailedCheck => "PaymentMethod_Mailed check",
        PaymentMethod::BankTransfer => "PaymentMethod_Bank transfer (automatic)",
        PaymentMethod::CreditCard => "PaymentMethod_Credit card (automatic)",
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Name → value mapping before projection. Contains exactly [`ENCODED_KEYS`].
pub fn encode_raw(profile: &CustomerProfile) -> HashMap<&'static str, f32> {
    let mut m = HashMap::with_capacity(ENCODED_KEYS.len());

    m.insert("tenure", profile.tenure_months as f32);
    m.insert("MonthlyCharges", profile.monthly_charges as f32);
    m.insert("TotalCharges", profile.total_charges as f32);
    m.insert("gender", flag(profile.gender == Gender::Male));
    m.insert("SeniorCitizen", flag(profile.senior_citizen));
    m.insert("Partner", flag(profile.partner));
    m.insert("Dependents", flag(profile.dependents));
    m.insert("PhoneService", flag(profile.phone_service));
    m.insert("PaperlessBilling", flag(profile.paperless_billing));

    for &c in Contract::ALL {
        m.insert(contract_key(c), flag(profile.contract == c));
    }
    for &s in InternetService::ALL {
        m.insert(internet_key(s), flag(profile.internet_service == s));
    }
    for (service, option) in profile.add_ons.iter() {
        let active = option.indicator();
        for indicator in [AddOnIndicator::Yes, AddOnIndicator::NoInternetService] {
            m.insert(add_on_key(service, indicator), flag(active == Some(indicator)));
        }
    }
    for &p in PaymentMethod::ALL {
        m.insert(payment_key(p), flag(profile.payment_method == p));
    }

    m
}

/// Encode onto `schema`: names the encoder does not produce read 0, encoder keys
/// absent from the schema are dropped. Out-of-bounds numeric fields are rejected.
pub fn encode(profile: &CustomerProfile, schema: &FeatureSchema) -> Result<FeatureVector> {
    if schema.is_empty() {
        return Err(ChurnError::SchemaMismatch("cannot encode onto an empty schema".to_string()));
    }
    profile.check_bounds()?;
    let raw = encode_raw(profile);
    let values: Vec<f32> = schema
        .names()
        .iter()
        .map(|name| raw.get(name.as_str()).copied().unwrap_or(0.0))
        .collect();

    Ok(FeatureVector {
        dim: schema.len(),
        values,
        customer_id: profile.customer_id.clone(),
        ts: Utc::now().timestamp_millis(),
        schema: schema.clone(),
    })
}

/// Encoder bound to the schema of a loaded model.
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    pub fn new(schema: FeatureSchema) -> Self {
        for name in schema.names() {
            if !ENCODED_KEYS.contains(&name.as_str()) {
                tracing::debug!(feature = %name, "schema feature not produced by encoder; always 0");
            }
        }
        for key in ENCODED_KEYS {
            if schema.index_of(key).is_none() {
                tracing::debug!(feature = key, "encoded feature absent from schema; dropped");
            }
        }
        Self { schema }
    }

    pub fn encode(&self, profile: &CustomerProfile) -> Result<FeatureVector> {
        encode(profile, &self.schema)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}
