//! Contract with the AI assessment collaborator.
//!
//! The model call itself happens outside this crate. An [`Assessor`] takes one
//! question and returns the raw response text, which is interpreted as a
//! tri-state answer.

use std::fmt;

use fnreview_model::{CanonicalField, FunctionRecord, SUBQUESTION_SEPARATOR};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AssessError;

/// Interpreted model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiAnswer {
    Yes,
    No,
    Uncertain,
}

impl AiAnswer {
    /// Reads the first word of a free-text response.
    ///
    /// `yes`/`ja`/`true` and `no`/`nein`/`false` are definite; anything else,
    /// including hedged answers, is uncertain.
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let word = lowered
            .split(|c: char| !c.is_alphanumeric())
            .find(|word| !word.is_empty())
            .unwrap_or("");
        match word {
            "yes" | "ja" | "true" => AiAnswer::Yes,
            "no" | "nein" | "false" => AiAnswer::No,
            _ => AiAnswer::Uncertain,
        }
    }

    pub fn value(&self) -> Option<bool> {
        match self {
            AiAnswer::Yes => Some(true),
            AiAnswer::No => Some(false),
            AiAnswer::Uncertain => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiAnswer::Yes => "yes",
            AiAnswer::No => "no",
            AiAnswer::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for AiAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question put to the assessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentRequest<'a> {
    pub function: &'a str,
    pub subquestion: Option<&'a str>,
    pub field: CanonicalField,
    /// Document text the answer should be based on.
    pub context: &'a str,
}

/// Produces a raw answer for one question.
pub trait Assessor {
    fn assess(&self, request: &AssessmentRequest<'_>) -> Result<String, AssessError>;
}

impl<F> Assessor for F
where
    F: Fn(&AssessmentRequest<'_>) -> Result<String, AssessError>,
{
    fn assess(&self, request: &AssessmentRequest<'_>) -> Result<String, AssessError> {
        self(request)
    }
}

/// An interpreted answer for one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Record name, `<function>: <sub-question>` for sub-questions.
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub field: CanonicalField,
    pub answer: AiAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentFailure {
    pub function: String,
    pub field: CanonicalField,
    pub error: AssessError,
}

/// Answers gathered for a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentBatch {
    pub assessments: Vec<Assessment>,
    pub failures: Vec<AssessmentFailure>,
}

/// Asks `assessor` about every field of every record.
///
/// Failed questions are logged and reported in the batch; they never stop the
/// remaining questions.
pub fn collect_assessments(
    assessor: &dyn Assessor,
    records: &[FunctionRecord],
    context: &str,
) -> AssessmentBatch {
    let mut batch = AssessmentBatch::default();

    for record in records {
        let (function, subquestion) = match &record.parent {
            Some(parent) => {
                let prefix = format!("{parent}{SUBQUESTION_SEPARATOR}");
                (
                    parent.as_str(),
                    Some(record.name.strip_prefix(&prefix).unwrap_or(&record.name)),
                )
            }
            None => (record.name.as_str(), None),
        };

        for field in CanonicalField::ALL {
            let request = AssessmentRequest {
                function,
                subquestion,
                field,
                context,
            };
            let result = assessor.assess(&request).and_then(|text| {
                if text.trim().is_empty() {
                    Err(AssessError::EmptyResponse)
                } else {
                    Ok(AiAnswer::parse(&text))
                }
            });
            match result {
                Ok(answer) => {
                    debug!(function = %record.name, field = %field, answer = %answer, "assessed");
                    batch.assessments.push(Assessment {
                        function: record.name.clone(),
                        parent: record.parent.clone(),
                        field,
                        answer,
                    });
                }
                Err(error) => {
                    warn!(function = %record.name, field = %field, error = %error, "assessment failed");
                    batch.failures.push(AssessmentFailure {
                        function: record.name.clone(),
                        field,
                        error,
                    });
                }
            }
        }
    }

    info!(
        answered = batch.assessments.len(),
        failed = batch.failures.len(),
        "collected assessments"
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_free_text_answers() {
        assert_eq!(AiAnswer::parse("Yes."), AiAnswer::Yes);
        assert_eq!(AiAnswer::parse("  \"Nein\", weil ..."), AiAnswer::No);
        assert_eq!(AiAnswer::parse("FALSE"), AiAnswer::No);
        assert_eq!(AiAnswer::parse("Possibly, depends"), AiAnswer::Uncertain);
        assert_eq!(AiAnswer::parse("Yesterday"), AiAnswer::Uncertain);
        assert_eq!(AiAnswer::parse(""), AiAnswer::Uncertain);
    }

    #[test]
    fn collects_answers_and_failures() {
        let records = vec![
            FunctionRecord::function("Login"),
            FunctionRecord::subquestion("Login", "Audit trail"),
        ];
        let assessor = |request: &AssessmentRequest<'_>| -> Result<String, AssessError> {
            match (request.subquestion, request.field) {
                (Some("Audit trail"), CanonicalField::AiInvolvement) => Ok(" ".to_string()),
                (Some(_), CanonicalField::MonitoringControl) => Err(AssessError::Backend {
                    reason: "rate limited".to_string(),
                }),
                (None, CanonicalField::AiInvolvement) => Ok("no".to_string()),
                _ => Ok("yes, it is".to_string()),
            }
        };

        let batch = collect_assessments(&assessor, &records, "context");
        assert_eq!(batch.assessments.len(), 6);
        assert_eq!(batch.failures.len(), 2);
        assert_eq!(batch.failures[0].function, "Login: Audit trail");
        assert_eq!(batch.failures[0].field, CanonicalField::MonitoringControl);
        assert_eq!(batch.failures[1].error, AssessError::EmptyResponse);

        let login_ai = batch
            .assessments
            .iter()
            .find(|a| a.function == "Login" && a.field == CanonicalField::AiInvolvement)
            .expect("login ai answer");
        assert_eq!(login_ai.answer, AiAnswer::No);
        assert!(
            batch
                .assessments
                .iter()
                .filter(|a| a.function == "Login: Audit trail")
                .all(|a| a.parent.as_deref() == Some("Login"))
        );
    }
}
