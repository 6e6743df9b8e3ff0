use chrono::NaiveDate;
use churnshield::config::ModelConfig;
use churnshield::model::{ModelFormat, Predictor};
use churnshield::profile::{
    AddOns, Contract, CustomerProfile, Gender, InternetService, PaymentMethod, ServiceOption,
};
use churnshield::FeatureSchema;
use std::path::PathBuf;

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[allow(dead_code)]
pub fn model_config() -> ModelConfig {
    ModelConfig {
        model_path: fixture_path("churn_model.json"),
        schema_path: fixture_path("feature_names.json"),
        format: ModelFormat::Auto,
    }
}

#[allow(dead_code)]
pub fn fixture_schema() -> FeatureSchema {
    FeatureSchema::load(&fixture_path("feature_names.json")).expect("fixture schema loads")
}

#[allow(dead_code)]
pub fn fixture_predictor() -> Predictor {
    Predictor::load(&model_config()).expect("fixture model loads")
}

/// Month-to-month fiber customer a year in, every add-on taken, paying by electronic check.
pub fn base_profile() -> CustomerProfile {
    CustomerProfile {
        customer_id: "cust-0001".to_string(),
        join_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        gender: Gender::Male,
        senior_citizen: false,
        partner: true,
        dependents: false,
        tenure_months: 12,
        monthly_charges: 70.0,
        total_charges: 1000.0,
        paperless_billing: true,
        phone_service: true,
        contract: Contract::MonthToMonth,
        internet_service: InternetService::FiberOptic,
        add_ons: AddOns::uniform(ServiceOption::Yes),
        payment_method: PaymentMethod::ElectronicCheck,
    }
}
