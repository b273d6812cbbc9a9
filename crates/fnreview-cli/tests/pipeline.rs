//! Integration tests for the pipeline module.

use std::fs;

use fnreview_cli::pipeline::{load_input_document, load_review_inputs, resolve_config};
use fnreview_config::{ExtractionConfig, ExtractionMode, StrategyKind};
use fnreview_extract::extract;
use fnreview_model::CanonicalField;
use fnreview_reconcile::{ReconciliationEngine, ReviewInputs};
use tempfile::TempDir;

#[test]
fn test_resolve_config_defaults() {
    let config = resolve_config(None, None, &[]).expect("default config");
    assert_eq!(config, ExtractionConfig::default());
}

#[test]
fn test_resolve_config_mode_override() {
    let config = resolve_config(None, Some("rule_only"), &[]).expect("rule only");
    assert_eq!(config.mode, ExtractionMode::RuleOnly);

    let order = [StrategyKind::Rule, StrategyKind::Table];
    let config = resolve_config(None, None, &order).expect("order only");
    assert_eq!(
        config.mode,
        ExtractionMode::Auto(vec![StrategyKind::Rule, StrategyKind::Table])
    );

    let config = resolve_config(None, Some("auto"), &[]).expect("auto");
    assert_eq!(config.mode, ExtractionMode::default());
}

#[test]
fn test_resolve_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("review.toml");
    fs::write(
        &path,
        r#"
[extraction]
mode = "table_only"

[[functions]]
name = "Login"
"#,
    )
    .expect("write config");

    let config = resolve_config(Some(&path), None, &[]).expect("load config");
    assert_eq!(config.mode, ExtractionMode::TableOnly);
    assert_eq!(config.functions.len(), 1);

    let config =
        resolve_config(Some(&path), Some("phrase_only"), &[]).expect("override config mode");
    assert_eq!(config.mode, ExtractionMode::PhraseOnly);

    let missing = dir.path().join("missing.toml");
    let error = resolve_config(Some(&missing), None, &[]).expect_err("missing file");
    assert!(format!("{error:#}").contains("missing.toml"));
}

#[test]
fn test_extract_from_csv_with_text() {
    let dir = TempDir::new().expect("temp dir");
    let table = dir.path().join("functions.csv");
    fs::write(
        &table,
        "Function;Technical availability;Employer deployment\nLogin;Yes;No\n",
    )
    .expect("write csv");
    let text = dir.path().join("notes.txt");
    fs::write(&text, "Reporting: technically available\n").expect("write text");

    let document = load_input_document(&table, Some(&text)).expect("load document");
    let config = resolve_config(None, None, &[]).expect("default config");
    let outcome = extract(&document, &config);
    assert_eq!(outcome.strategy, Some(StrategyKind::Table));
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(
        outcome.records[0].value(CanonicalField::EmployerDeployment),
        Some(false)
    );
}

#[test]
fn test_reconcile_from_json_inputs() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("inputs.json");
    fs::write(
        &path,
        r#"{
  "functions": [
    {
      "name": "Login",
      "fields": {
        "technical_availability": {"document": true, "ai": false},
        "ai_involvement": {"document": false, "ai": false}
      }
    },
    {
      "name": "Login: Audit trail",
      "parent": "Login",
      "fields": {
        "monitoring_control": {"document": true, "ai": false, "manual": true}
      }
    }
  ]
}"#,
    )
    .expect("write inputs");

    let inputs = load_review_inputs(&path).expect("load inputs");
    assert_eq!(inputs.functions.len(), 2);
    let report = ReconciliationEngine::default().reconcile(&inputs);
    insta::assert_json_snapshot!(report.conflicts, @r###"
    [
      {
        "function": "Login",
        "field": "technical_availability",
        "document": true,
        "ai": false
      }
    ]
    "###);
    assert!(!report.function("Login").expect("login").negotiable);
    assert!(report.function("Login: Audit trail").expect("sub").negotiable);

    fs::write(&path, "{\"functions\": 3}").expect("write broken inputs");
    assert!(load_review_inputs(&path).is_err());

    let empty: ReviewInputs = serde_json::from_str("{}").expect("empty inputs");
    assert!(empty.functions.is_empty());
}
