//! Reconciliation tests across extraction, assessment and review.

use fnreview_config::{ExtractionConfig, FunctionSpec, ReviewOptions, SubQuestionSpec};
use fnreview_model::{CanonicalField, Document, SourceKind};
use fnreview_reconcile::{
    AssessError, AssessmentRequest, DocumentVersion, FieldInputs, MemoryStore, ReviewInputs,
    ReviewStore, collect_assessments, reconcile, reconcile_field, reconcile_version,
};
use proptest::prelude::*;

#[test]
fn test_manual_value_clears_review() {
    let mut inputs = ReviewInputs::new();
    inputs
        .entry("Login", None)
        .field_mut(CanonicalField::TechnicalAvailability)
        .document = Some(true);
    inputs
        .entry("Login", None)
        .field_mut(CanonicalField::TechnicalAvailability)
        .ai = Some(false);

    let report = reconcile(&inputs, ReviewOptions::default());
    let field = report
        .get("Login", CanonicalField::TechnicalAvailability)
        .expect("login field");
    assert!(field.requires_manual_review);
    assert!(!field.agrees);
    assert_eq!(report.review_count(), 1);
    assert!(!report.function("Login").expect("login").negotiable);

    inputs.set_manual("Login", CanonicalField::TechnicalAvailability, Some(true));
    let report = reconcile(&inputs, ReviewOptions::default());
    let field = report
        .get("Login", CanonicalField::TechnicalAvailability)
        .expect("login field");
    assert!(!field.requires_manual_review);
    assert_eq!(field.source, Some(SourceKind::Manual));
    assert!(report.is_clean());
    assert!(report.function("Login").expect("login").negotiable);
}

#[test]
fn test_report_snapshot() {
    let mut inputs = ReviewInputs::new();
    let login = inputs.entry("Login", None);
    *login.field_mut(CanonicalField::TechnicalAvailability) =
        FieldInputs::new(Some(true), Some(true), None);
    *login.field_mut(CanonicalField::MonitoringControl) =
        FieldInputs::new(Some(false), Some(true), None);

    let report = reconcile(&inputs, ReviewOptions::default());
    insta::assert_json_snapshot!(report, @r###"
    {
      "functions": [
        {
          "name": "Login",
          "fields": {
            "technical_availability": {
              "canonical_value": true,
              "source": "ai",
              "agrees": true,
              "requires_manual_review": false
            },
            "employer_deployment": {
              "canonical_value": null,
              "source": null,
              "agrees": false,
              "requires_manual_review": false
            },
            "monitoring_control": {
              "canonical_value": false,
              "source": "document",
              "agrees": false,
              "requires_manual_review": true
            },
            "ai_involvement": {
              "canonical_value": null,
              "source": null,
              "agrees": false,
              "requires_manual_review": false
            }
          },
          "negotiable": false
        }
      ],
      "conflicts": [
        {
          "function": "Login",
          "field": "monitoring_control",
          "document": false,
          "ai": true
        }
      ]
    }
    "###);
    assert_eq!(report.agreement_count(), 1);
    assert_eq!(report.undecided_count(), 2);
    assert_eq!(report.source_counts().get(&SourceKind::Document), Some(&1));
}

#[test]
fn test_extract_assess_reconcile() {
    let config = ExtractionConfig::default().with_function(
        FunctionSpec::new("Login").with_subquestion(SubQuestionSpec::new("Audit trail")),
    );
    let document = Document::from_text(
        "Login: technically available, not in use\nAudit trail: used for monitoring",
    );
    let outcome = fnreview_extract::extract(&document, &config);
    assert_eq!(outcome.records.len(), 2);

    let assessor = |request: &AssessmentRequest<'_>| -> Result<String, AssessError> {
        Ok(match request.field {
            CanonicalField::EmployerDeployment => "Yes".to_string(),
            CanonicalField::AiInvolvement => "unclear".to_string(),
            _ => "yes".to_string(),
        })
    };
    let batch = collect_assessments(&assessor, &outcome.records, &document.text);
    assert!(batch.failures.is_empty());

    let mut inputs = ReviewInputs::from_records(&outcome.records);
    inputs.apply_assessments(&batch.assessments);

    let mut store = MemoryStore::new();
    store
        .save(DocumentVersion(1), inputs)
        .expect("store inputs");
    let report = reconcile_version(&store, DocumentVersion(1), config.review).expect("reconcile");

    let deployment = report
        .get("Login", CanonicalField::EmployerDeployment)
        .expect("deployment");
    assert_eq!(deployment.canonical_value, Some(false));
    assert_eq!(deployment.source, Some(SourceKind::Document));
    assert!(deployment.requires_manual_review);

    let monitoring = report
        .get("Login: Audit trail", CanonicalField::MonitoringControl)
        .expect("sub monitoring");
    assert!(monitoring.agrees);

    let ai = report
        .get("Login", CanonicalField::AiInvolvement)
        .expect("ai involvement");
    assert_eq!(ai.canonical_value, None);
    assert_eq!(report.conflicts.len(), 1);
}

fn tri_state() -> impl Strategy<Value = Option<bool>> {
    prop::option::of(any::<bool>())
}

fn field_strategy() -> impl Strategy<Value = CanonicalField> {
    prop::sample::select(CanonicalField::ALL.to_vec())
}

proptest! {
    #[test]
    fn review_needed_exactly_on_unresolved_disagreement(
        field in field_strategy(),
        document in tri_state(),
        ai in tri_state(),
        manual in tri_state(),
    ) {
        let decided = reconcile_field(field, FieldInputs::new(document, ai, manual));
        let disagree = matches!((document, ai), (Some(d), Some(a)) if d != a);
        prop_assert_eq!(decided.requires_manual_review, disagree && manual.is_none());
        prop_assert_eq!(decided.agrees, document.is_some() && document == ai);

        if let Some(value) = manual {
            prop_assert_eq!(decided.canonical_value, Some(value));
            prop_assert_eq!(decided.source, Some(SourceKind::Manual));
        } else if document.is_none() && ai.is_none() {
            prop_assert_eq!(decided.source, None);
        }
        prop_assert_eq!(decided.canonical_value.is_some(), decided.source.is_some());
    }

    #[test]
    fn reconciliation_is_pure(
        values in prop::collection::vec((tri_state(), tri_state(), tri_state()), 1..6),
    ) {
        let mut inputs = ReviewInputs::new();
        for (index, (document, ai, manual)) in values.into_iter().enumerate() {
            *inputs
                .entry(&format!("Function {index}"), None)
                .field_mut(CanonicalField::AiInvolvement) = FieldInputs::new(document, ai, manual);
        }
        let first = reconcile(&inputs, ReviewOptions::default());
        let second = reconcile(&inputs, ReviewOptions::default());
        prop_assert_eq!(first, second);
    }
}
