//! Per-field source values fed into the engine.

use std::collections::BTreeMap;

use fnreview_model::{CanonicalField, FunctionRecord};
use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;

/// The three observations of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInputs {
    #[serde(default)]
    pub document: Option<bool>,
    #[serde(default)]
    pub ai: Option<bool>,
    #[serde(default)]
    pub manual: Option<bool>,
}

impl FieldInputs {
    pub fn new(document: Option<bool>, ai: Option<bool>, manual: Option<bool>) -> Self {
        Self {
            document,
            ai,
            manual,
        }
    }
}

/// Source values for one function or sub-question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInputs {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<CanonicalField, FieldInputs>,
    /// Reviewer decision on negotiability, independent of the field values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiable_override: Option<bool>,
}

impl FunctionInputs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_subquestion(&self) -> bool {
        self.parent.is_some()
    }

    pub fn field(&self, field: CanonicalField) -> FieldInputs {
        self.fields.get(&field).copied().unwrap_or_default()
    }

    pub fn field_mut(&mut self, field: CanonicalField) -> &mut FieldInputs {
        self.fields.entry(field).or_default()
    }
}

/// Everything known about one document version, in function order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInputs {
    #[serde(default)]
    pub functions: Vec<FunctionInputs>,
}

impl ReviewInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document values taken from an extraction run.
    ///
    /// Indeterminate cells contribute no document value.
    pub fn from_records(records: &[FunctionRecord]) -> Self {
        let mut inputs = Self::new();
        for record in records {
            let function = inputs.entry(&record.name, record.parent.as_deref());
            for (field, cell) in &record.fields {
                function.field_mut(*field).document = cell.value;
            }
        }
        inputs
    }

    pub fn function(&self, name: &str) -> Option<&FunctionInputs> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut FunctionInputs> {
        self.functions.iter_mut().find(|function| function.name == name)
    }

    /// The entry for `name`, appended when missing.
    pub fn entry(&mut self, name: &str, parent: Option<&str>) -> &mut FunctionInputs {
        let index = match self.functions.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                let mut function = FunctionInputs::new(name);
                function.parent = parent.map(str::to_string);
                self.functions.push(function);
                self.functions.len() - 1
            }
        };
        &mut self.functions[index]
    }

    /// Records a reviewer's value. `None` clears an earlier override.
    pub fn set_manual(&mut self, name: &str, field: CanonicalField, value: Option<bool>) {
        self.entry(name, None).field_mut(field).manual = value;
    }

    pub fn set_negotiable_override(&mut self, name: &str, value: Option<bool>) {
        self.entry(name, None).negotiable_override = value;
    }

    /// Stores AI answers; uncertain answers clear the AI value.
    pub fn apply_assessments(&mut self, assessments: &[Assessment]) {
        for assessment in assessments {
            self.entry(&assessment.function, assessment.parent.as_deref())
                .field_mut(assessment.field)
                .ai = assessment.answer.value();
        }
    }

    /// Sub-questions of `parent`, in order.
    pub fn subquestions<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a FunctionInputs> {
        self.functions
            .iter()
            .filter(move |function| function.parent.as_deref() == Some(parent))
    }
}

#[cfg(test)]
mod tests {
    use fnreview_model::CellValue;

    use super::*;
    use crate::assessment::AiAnswer;

    #[test]
    fn from_records_keeps_order_and_parents() {
        let mut login = FunctionRecord::function("Login");
        login.set(CanonicalField::TechnicalAvailability, CellValue::answer(true));
        login.set(CanonicalField::EmployerDeployment, CellValue::indeterminate());
        let mut audit = FunctionRecord::subquestion("Login", "Audit trail");
        audit.set(CanonicalField::MonitoringControl, CellValue::answer(false));

        let inputs = ReviewInputs::from_records(&[login, audit]);
        assert_eq!(inputs.functions.len(), 2);
        let login = inputs.function("Login").expect("login inputs");
        assert_eq!(login.field(CanonicalField::TechnicalAvailability).document, Some(true));
        assert_eq!(login.field(CanonicalField::EmployerDeployment).document, None);
        let audit = &inputs.functions[1];
        assert_eq!(audit.parent.as_deref(), Some("Login"));
        assert_eq!(inputs.subquestions("Login").count(), 1);
    }

    #[test]
    fn assessments_fill_ai_values() {
        let mut inputs = ReviewInputs::new();
        inputs.apply_assessments(&[
            Assessment {
                function: "Login".to_string(),
                parent: None,
                field: CanonicalField::AiInvolvement,
                answer: AiAnswer::Yes,
            },
            Assessment {
                function: "Login".to_string(),
                parent: None,
                field: CanonicalField::MonitoringControl,
                answer: AiAnswer::Uncertain,
            },
        ]);
        let login = inputs.function("Login").expect("login inputs");
        assert_eq!(login.field(CanonicalField::AiInvolvement).ai, Some(true));
        assert_eq!(login.field(CanonicalField::MonitoringControl).ai, None);
    }

    #[test]
    fn deserializes_sparse_json() {
        let inputs: ReviewInputs = serde_json::from_str(
            r#"{"functions": [{"name": "Login", "fields": {"ai_involvement": {"ai": true}}}]}"#,
        )
        .expect("parse inputs");
        let field = inputs.functions[0].field(CanonicalField::AiInvolvement);
        assert_eq!(field, FieldInputs::new(None, Some(true), None));
    }
}
