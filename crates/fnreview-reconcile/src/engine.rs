//! Merges document, AI and manual values into one decision per field.
//!
//! A manual value always wins. Otherwise the AI value wins, except for
//! employer deployment and monitoring control where a document value is taken
//! over the AI value. Document and AI disagreeing without a manual value is
//! the one case that requires a reviewer.

use fnreview_config::ReviewOptions;
use fnreview_model::{CanonicalField, ReconciledField, SourceKind};
use tracing::{debug, info};

use crate::inputs::{FieldInputs, ReviewInputs};
use crate::report::{Conflict, FunctionDecision, ReconciliationReport};

/// Decision for a single field.
pub fn reconcile_field(field: CanonicalField, inputs: FieldInputs) -> ReconciledField {
    let (canonical_value, source) = match inputs {
        FieldInputs {
            manual: Some(value),
            ..
        } => (Some(value), Some(SourceKind::Manual)),
        FieldInputs {
            document: Some(value),
            ..
        } if field.prefers_document() => (Some(value), Some(SourceKind::Document)),
        FieldInputs { ai: Some(value), .. } => (Some(value), Some(SourceKind::Ai)),
        FieldInputs {
            document: Some(value),
            ..
        } => (Some(value), Some(SourceKind::Document)),
        _ => (None, None),
    };

    let (agrees, disagrees) = match (inputs.document, inputs.ai) {
        (Some(document), Some(ai)) => (document == ai, document != ai),
        _ => (false, false),
    };

    ReconciledField {
        canonical_value,
        source,
        agrees,
        requires_manual_review: disagrees && inputs.manual.is_none(),
        subquestion_available: false,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    options: ReviewOptions,
}

impl ReconciliationEngine {
    pub fn new(options: ReviewOptions) -> Self {
        Self { options }
    }

    pub fn reconcile(&self, inputs: &ReviewInputs) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();

        for function in &inputs.functions {
            let fields = CanonicalField::ALL
                .into_iter()
                .map(|field| (field, reconcile_field(field, function.field(field))))
                .collect();
            report.functions.push(FunctionDecision {
                name: function.name.clone(),
                parent: function.parent.clone(),
                fields,
                negotiable: false,
            });

            for field in CanonicalField::ALL {
                let values = function.field(field);
                if let (Some(document), Some(ai), None) = (values.document, values.ai, values.manual)
                    && document != ai
                {
                    debug!(function = %function.name, field = %field, document, ai, "needs review");
                    report.conflicts.push(Conflict {
                        function: function.name.clone(),
                        field,
                        document,
                        ai,
                    });
                }
            }
        }

        if self.options.flag_subquestion_availability {
            flag_subquestion_availability(&mut report);
        }
        apply_negotiability(&mut report, inputs);

        info!(
            functions = report.functions.len(),
            conflicts = report.review_count(),
            agreements = report.agreement_count(),
            "reconciled"
        );
        report
    }
}

/// Flags a function whose technical availability is not `true` while one of
/// its sub-questions reconciles to `true`. Values and sources stay as they are.
fn flag_subquestion_availability(report: &mut ReconciliationReport) {
    let field = CanonicalField::TechnicalAvailability;
    let available: Vec<String> = report
        .functions
        .iter()
        .filter_map(|decision| {
            let parent = decision.parent.as_ref()?;
            let reconciled = decision.get(field)?;
            (reconciled.canonical_value == Some(true)).then(|| parent.clone())
        })
        .collect();

    for decision in report.functions.iter_mut().filter(|d| d.parent.is_none()) {
        if !available.contains(&decision.name) {
            continue;
        }
        let Some(reconciled) = decision.fields.get_mut(&field) else {
            continue;
        };
        if reconciled.canonical_value == Some(true) {
            continue;
        }
        debug!(function = %decision.name, "sub-question available but function is not");
        reconciled.subquestion_available = true;
    }
}

/// A manual override decides; otherwise a function is negotiable when neither
/// it nor any of its sub-questions needs review.
fn apply_negotiability(report: &mut ReconciliationReport, inputs: &ReviewInputs) {
    let needs_review: Vec<(String, Option<String>, bool)> = report
        .functions
        .iter()
        .map(|d| (d.name.clone(), d.parent.clone(), d.requires_manual_review()))
        .collect();

    for decision in &mut report.functions {
        let manual = inputs
            .function(&decision.name)
            .and_then(|function| function.negotiable_override);
        decision.negotiable = match manual {
            Some(value) => value,
            None => !needs_review.iter().any(|(name, parent, review)| {
                *review
                    && (*name == decision.name
                        || (decision.parent.is_none()
                            && parent.as_deref() == Some(decision.name.as_str())))
            }),
        };
    }
}

/// Reconciles every function in `inputs`.
pub fn reconcile(inputs: &ReviewInputs, options: ReviewOptions) -> ReconciliationReport {
    ReconciliationEngine::new(options).reconcile(inputs)
}
