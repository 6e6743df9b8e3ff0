//! Inference benchmark: feature vector → XGBoost JSON booster probability.

use chrono::NaiveDate;
use churnshield::config::ModelConfig;
use churnshield::model::{ModelFormat, Predictor};
use churnshield::profile::{AddOns, Contract, CustomerProfile, Gender, InternetService, PaymentMethod, ServiceOption};
use churnshield::encode;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

fn fixture_predictor() -> Predictor {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    Predictor::load(&ModelConfig {
        model_path: dir.join("churn_model.json"),
        schema_path: dir.join("feature_names.json"),
        format: ModelFormat::XgboostJson,
    })
    .expect("fixture model")
}

fn profile() -> CustomerProfile {
    CustomerProfile {
        customer_id: "bench".to_string(),
        join_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
        gender: Gender::Female,
        senior_citizen: false,
        partner: true,
        dependents: true,
        tenure_months: 30,
        monthly_charges: 89.5,
        total_charges: 2685.0,
        paperless_billing: true,
        phone_service: true,
        contract: Contract::MonthToMonth,
        internet_service: InternetService::FiberOptic,
        add_ons: AddOns::uniform(ServiceOption::No),
        payment_method: PaymentMethod::ElectronicCheck,
    }
}

fn bench_predict(c: &mut Criterion) {
    let predictor = fixture_predictor();
    let fv = encode(&profile(), predictor.schema()).expect("encode");

    c.bench_function("xgboost_predict_33d", |b| {
        b.iter(|| predictor.predict(black_box(&fv)))
    });
}

fn bench_load(c: &mut Criterion) {
    c.bench_function("xgboost_load_fixture", |b| b.iter(|| black_box(fixture_predictor())));
}

criterion_group!(benches, bench_predict, bench_load);
criterion_main!(benches);
