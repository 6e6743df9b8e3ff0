//! Integration test: config load, artifact loading, end-to-end evaluation.

#[path = "util/fixtures.rs"]
mod fixtures;

use churnshield::{
    config::{ChurnConfig, ModelConfig, RiskConfig},
    model::{ModelFormat, Predictor, XgbBooster},
    pipeline::{ChurnPipeline, RunStats},
    profile::{Contract, OutOfRangePolicy, ServiceOption},
    retention::{playbook, BEST_PRACTICES},
    risk::{RiskEngine, RiskTier},
    ChurnError, FeatureSchema, StructuredLogger,
};
use fixtures::{base_profile, fixture_path, fixture_predictor, fixture_schema, model_config};
use std::path::Path;

fn pipeline() -> ChurnPipeline {
    ChurnPipeline::new(fixture_predictor(), RiskEngine::default())
}

#[test]
fn config_load_default() {
    let c = ChurnConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.risk.high_threshold, 0.7);
    assert_eq!(c.risk.medium_threshold, 0.4);
    assert_eq!(c.input.out_of_range, OutOfRangePolicy::Reject);
    assert_eq!(c.model.format, ModelFormat::Auto);
    assert!(c.validate().is_ok());
}

#[test]
fn config_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"risk":{"high_threshold":0.8},"input":{"out_of_range":"clamp"},"log":{"json":false}}"#,
    )
    .unwrap();
    let c = ChurnConfig::load(&path);
    assert_eq!(c.risk.high_threshold, 0.8);
    assert_eq!(c.risk.medium_threshold, 0.4);
    assert_eq!(c.input.out_of_range, OutOfRangePolicy::Clamp);
    assert!(!c.log.json);
    assert_eq!(c.log.level, "info");
}

#[test]
fn config_unparsable_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let c = ChurnConfig::load(&path);
    assert_eq!(c.risk.high_threshold, 0.7);
}

#[test]
fn try_load_surfaces_unparsable_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(ChurnConfig::try_load(&path), Err(ChurnError::Serialization(_))));
    assert!(ChurnConfig::try_load(Path::new("nonexistent.json")).is_ok());
}

#[test]
fn end_to_end_high_risk() {
    let mut p = base_profile();
    p.add_ons.tech_support = ServiceOption::No;
    let report = pipeline().evaluate(&p).unwrap();
    assert!((report.assessment.probability - 0.82).abs() < 1e-4);
    assert_eq!(report.assessment.tier, RiskTier::High);
    assert_eq!(report.assessment.description, "Immediate action required");
    assert_eq!(report.playbook.tier, RiskTier::High);
    assert_eq!(report.customer_id, "cust-0001");
    assert_eq!(report.impacts.len(), 7);
    assert_eq!(report.key_factors.len(), 7);
}

#[test]
fn end_to_end_medium_and_low() {
    let pipeline = pipeline();

    // month-to-month, tenure 12, tech support: 1.516 - 0.8
    let report = pipeline.evaluate(&base_profile()).unwrap();
    assert!((report.assessment.probability - 0.6718).abs() < 1e-3);
    assert_eq!(report.assessment.tier, RiskTier::Medium);

    let mut p = base_profile();
    p.contract = Contract::TwoYear;
    let report = pipeline.evaluate(&p).unwrap();
    assert!((report.assessment.probability - 0.1192).abs() < 1e-3);
    assert_eq!(report.assessment.tier, RiskTier::Low);
    assert_eq!(report.assessment.description, "Normal monitoring");
}

#[test]
fn longer_tenure_takes_other_branch() {
    let mut p = base_profile();
    p.tenure_months = 24;
    p.add_ons.tech_support = ServiceOption::No;
    let probability = pipeline().evaluate(&p).unwrap().assessment.probability;
    assert!((probability - 0.5744).abs() < 1e-3);
}

#[test]
fn predictions_are_deterministic() {
    let predictor = fixture_predictor();
    let schema = predictor.schema().clone();
    let fv = churnshield::encode(&base_profile(), &schema).unwrap();
    assert_eq!(predictor.predict(&fv).unwrap(), predictor.predict(&fv).unwrap());
}

#[test]
fn report_serializes_as_json_line() {
    let report = pipeline().evaluate(&base_profile()).unwrap();
    let mut buf = Vec::new();
    StructuredLogger::emit_json(&report, &mut buf).unwrap();
    let line = String::from_utf8(buf).unwrap();
    assert!(line.ends_with('\n'));
    let v: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(v["assessment"]["tier"], "MEDIUM");
    assert_eq!(v["playbook"]["tier"], "MEDIUM");
    assert_eq!(v["customer_id"], "cust-0001");
}

#[test]
fn from_config_loads_fixture_artifacts() {
    let config = ChurnConfig {
        model: model_config(),
        ..Default::default()
    };
    let pipeline = ChurnPipeline::from_config(&config).unwrap();
    let info = pipeline.predictor().info();
    assert_eq!(info.format, ModelFormat::XgboostJson);
    assert_eq!(info.input_width, 33);
    assert_eq!(info.sha256.as_ref().map(|s| s.len()), Some(64));
}

#[test]
fn from_config_rejects_bad_thresholds() {
    let config = ChurnConfig {
        model: model_config(),
        risk: RiskConfig {
            high_threshold: 1.5,
            medium_threshold: 0.4,
        },
        ..Default::default()
    };
    let err = ChurnPipeline::from_config(&config).err().unwrap();
    assert!(matches!(err, ChurnError::Config(_)));
}

#[test]
fn missing_model_is_fatal() {
    let config = ModelConfig {
        model_path: "nonexistent.json".into(),
        ..model_config()
    };
    let err = Predictor::load(&config).unwrap_err();
    assert!(matches!(err, ChurnError::ArtifactMissing(_)));
}

#[test]
fn missing_schema_is_fatal() {
    let config = ModelConfig {
        schema_path: "nonexistent_names.json".into(),
        ..model_config()
    };
    let err = Predictor::load(&config).unwrap_err();
    assert!(matches!(err, ChurnError::ArtifactMissing(_)));
}

#[test]
fn corrupt_model_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("churn_model.json");
    std::fs::write(&model_path, "{\"learner\": 7}").unwrap();
    let config = ModelConfig {
        model_path,
        ..model_config()
    };
    let err = Predictor::load(&config).unwrap_err();
    assert!(matches!(err, ChurnError::Serialization(_)));
}

#[test]
fn empty_schema_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("feature_names.json");
    std::fs::write(&schema_path, "[]").unwrap();
    let config = ModelConfig {
        schema_path,
        ..model_config()
    };
    let err = Predictor::load(&config).unwrap_err();
    assert!(matches!(err, ChurnError::SchemaMismatch(_)));
}

#[test]
fn width_mismatch_is_fatal_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("feature_names.json");
    let names = FeatureSchema::encoder_default().names().to_vec();
    std::fs::write(&schema_path, serde_json::to_string(&names).unwrap()).unwrap();
    let config = ModelConfig {
        schema_path,
        ..model_config()
    };
    let err = Predictor::load(&config).unwrap_err();
    assert!(matches!(err, ChurnError::WidthMismatch { schema: 31, model: 33 }));
}

#[test]
fn reordered_schema_is_fatal_at_load() {
    let mut names = fixture_schema().names().to_vec();
    names.swap(0, 1);
    let booster = XgbBooster::load(&fixture_path("churn_model.json")).unwrap();
    let err = Predictor::new(Box::new(booster), FeatureSchema::new(names).unwrap()).unwrap_err();
    assert!(matches!(err, ChurnError::SchemaMismatch(_)));
}

#[test]
fn vector_from_another_schema_is_rejected() {
    let predictor = fixture_predictor();
    let fv = churnshield::encode(&base_profile(), &FeatureSchema::encoder_default()).unwrap();
    assert!(matches!(predictor.predict(&fv), Err(ChurnError::SchemaMismatch(_))));
}

#[test]
fn split_count_importance_from_model() {
    let importance = fixture_predictor().feature_importance().unwrap();
    let names: Vec<&str> = importance.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(importance.len(), 3);
    assert!(names.contains(&"Contract_Month-to-month"));
    assert!(names.contains(&"tenure"));
    assert!(names.contains(&"TechSupport_Yes"));
    let total: f64 = importance.iter().map(|(_, w)| w).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn playbooks_are_keyed_by_tier() {
    for tier in [RiskTier::High, RiskTier::Medium, RiskTier::Low] {
        let book = playbook(tier);
        assert_eq!(book.tier, tier);
        assert_eq!(book.actions.len(), 5);
        assert!(!book.follow_up.is_empty());
    }
    assert_eq!(BEST_PRACTICES.len(), 5);
}

fn run(input: &[u8]) -> (RunStats, Vec<serde_json::Value>) {
    let mut out = Vec::new();
    let stats = pipeline()
        .run_lines(input, &mut out, OutOfRangePolicy::Reject)
        .unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (stats, lines)
}

#[test]
fn run_lines_writes_one_line_per_input() {
    let input = b"{\"customer_id\":\"a\"}\n\n   \n{\"customer_id\":\"b\",\"contract\":\"Two year\"}\n";
    let (stats, lines) = run(input);
    assert_eq!(stats, RunStats { evaluated: 2, rejected: 0 });
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["customer_id"], "a");
    assert_eq!(lines[1]["customer_id"], "b");
    assert_eq!(lines[1]["assessment"]["tier"], "LOW");
}

#[test]
fn run_lines_rejects_bad_lines_and_continues() {
    let input = b"{ not json\n{\"customer_id\":\"x\",\"internet_service\":\"Satellite\"}\n{\"customer_id\":\"y\",\"tenure\":500}\n{\"customer_id\":\"z\"}";
    let (stats, lines) = run(input);
    assert_eq!(stats, RunStats { evaluated: 1, rejected: 3 });
    assert_eq!(lines.len(), 4);
    assert!(lines[0].get("customer_id").is_none());
    assert!(lines[0]["error"].as_str().unwrap().starts_with("Serialization error"));
    assert_eq!(lines[1]["customer_id"], "x");
    assert!(lines[1]["error"].as_str().unwrap().contains("internet_service"));
    assert_eq!(lines[2]["customer_id"], "y");
    assert!(lines[2]["error"].as_str().unwrap().contains("tenure"));
    // last line has no trailing newline
    assert_eq!(lines[3]["customer_id"], "z");
    assert!(lines[3].get("assessment").is_some());
}

#[test]
fn run_lines_survives_invalid_utf8() {
    let input = b"{\"customer_id\":\"a\"}\n\xff\xfe\n{\"customer_id\":\"b\"}\n";
    let (stats, lines) = run(input);
    assert_eq!(stats, RunStats { evaluated: 2, rejected: 1 });
    assert_eq!(lines[0]["customer_id"], "a");
    assert!(lines[1]["error"].as_str().unwrap().contains("UTF-8"));
    assert_eq!(lines[2]["customer_id"], "b");
}
