//! Tests for fnreview-model types.

use fnreview_model::{
    CanonicalField, CellValue, Document, FunctionRecord, ReconciledField, SourceKind,
    table_from_rows,
};

#[test]
fn record_serializes_with_snake_case_fields() {
    let mut record = FunctionRecord::function("Login");
    record.set(
        CanonicalField::TechnicalAvailability,
        CellValue::answer(true).with_note("internal only"),
    );
    record.set(CanonicalField::EmployerDeployment, CellValue::indeterminate());

    insta::assert_json_snapshot!(record, @r###"
    {
      "name": "Login",
      "fields": {
        "technical_availability": {
          "value": true,
          "note": "internal only"
        },
        "employer_deployment": {
          "value": null,
          "note": null
        }
      }
    }
    "###);
}

#[test]
fn reconciled_field_omits_subquestion_flag_when_unset() {
    let field = ReconciledField {
        canonical_value: Some(false),
        source: Some(SourceKind::Ai),
        agrees: false,
        requires_manual_review: true,
        subquestion_available: false,
    };
    let json = serde_json::to_value(field).expect("serialize field");
    assert_eq!(json["source"], "ai");
    assert!(json.get("subquestion_available").is_none());
}

#[test]
fn document_deserializes_with_missing_parts() {
    let doc: Document = serde_json::from_str(r#"{"text": "Login: yes"}"#).expect("parse document");
    assert!(doc.tables.is_empty());
    assert!(doc.has_text());

    let doc: Document =
        serde_json::from_str(r#"{"tables": [{"rows": [["Function"], ["Login"]]}]}"#)
            .expect("parse document");
    assert_eq!(doc.tables, vec![table_from_rows([vec!["Function"], vec!["Login"]])]);
    assert!(!doc.has_text());
}
