//! Extracted per-function records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{CanonicalField, CellValue};

/// Separator between a function name and its sub-question text.
pub const SUBQUESTION_SEPARATOR: &str = ": ";

/// Extracted values for one function or sub-question.
///
/// Sub-question records are named `"<function>: <sub-question text>"` and
/// carry the parent function name in `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<CanonicalField, CellValue>,
}

impl FunctionRecord {
    /// Record for a main function.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: BTreeMap::new(),
        }
    }

    /// Record for a sub-question scoped to `parent`.
    pub fn subquestion(parent: &str, text: &str) -> Self {
        Self {
            name: subquestion_name(parent, text),
            parent: Some(parent.to_string()),
            fields: BTreeMap::new(),
        }
    }

    pub fn is_subquestion(&self) -> bool {
        self.parent.is_some()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&CellValue> {
        self.fields.get(&field)
    }

    /// The boolean answer for a field, `None` when absent or indeterminate.
    pub fn value(&self, field: CanonicalField) -> Option<bool> {
        self.fields.get(&field).and_then(|cell| cell.value)
    }

    pub fn set(&mut self, field: CanonicalField, cell: CellValue) {
        self.fields.insert(field, cell);
    }

    /// Sets a field only when it is not present yet. Returns true when set.
    pub fn set_if_absent(&mut self, field: CanonicalField, cell: CellValue) -> bool {
        if self.fields.contains_key(&field) {
            return false;
        }
        self.fields.insert(field, cell);
        true
    }

    /// Merges a later observation of the same record into this one.
    ///
    /// Per field the latest definite value wins; an indeterminate later value
    /// never erases an earlier definite one, but fills a missing note.
    pub fn merge_latest(&mut self, later: &FunctionRecord) {
        for (field, cell) in &later.fields {
            match self.fields.get_mut(field) {
                None => {
                    self.fields.insert(*field, cell.clone());
                }
                Some(existing) => {
                    if cell.value.is_some() {
                        *existing = cell.clone();
                    } else if existing.note.is_none() && cell.note.is_some() {
                        existing.note.clone_from(&cell.note);
                    }
                }
            }
        }
    }
}

/// Builds the lookup name of a sub-question record.
pub fn subquestion_name(parent: &str, text: &str) -> String {
    format!("{}{}{}", parent.trim(), SUBQUESTION_SEPARATOR, text.trim())
}

/// Ordered collection of records keyed by name.
///
/// Records keep the order in which their name was first seen, so two runs over
/// the same input always produce the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<FunctionRecord>,
    index: BTreeMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    /// Returns the record with the same name, inserting `template` if missing.
    pub fn entry(&mut self, template: FunctionRecord) -> &mut FunctionRecord {
        let idx = match self.index.get(&template.name) {
            Some(&idx) => idx,
            None => {
                let idx = self.records.len();
                self.index.insert(template.name.clone(), idx);
                self.records.push(template);
                idx
            }
        };
        &mut self.records[idx]
    }

    /// Adds a record, merging it into an earlier record of the same name.
    pub fn merge(&mut self, record: FunctionRecord) {
        match self.index.get(&record.name) {
            Some(&idx) => self.records[idx].merge_latest(&record),
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<FunctionRecord> {
        self.records
    }
}

impl FromIterator<FunctionRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = FunctionRecord>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for record in iter {
            set.merge(record);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subquestion_name_joins_parent_and_text() {
        let record = FunctionRecord::subquestion("Login", " Is it logged? ");
        assert_eq!(record.name, "Login: Is it logged?");
        assert_eq!(record.parent.as_deref(), Some("Login"));
        assert!(record.is_subquestion());
    }

    #[test]
    fn merge_keeps_latest_definite_value() {
        let mut first = FunctionRecord::function("Login");
        first.set(CanonicalField::TechnicalAvailability, CellValue::answer(false));
        first.set(
            CanonicalField::AiInvolvement,
            CellValue::answer(true).with_note("vendor model"),
        );

        let mut later = FunctionRecord::function("Login");
        later.set(CanonicalField::TechnicalAvailability, CellValue::answer(true));
        later.set(CanonicalField::AiInvolvement, CellValue::indeterminate());
        later.set(CanonicalField::MonitoringControl, CellValue::answer(false));

        first.merge_latest(&later);
        assert_eq!(first.value(CanonicalField::TechnicalAvailability), Some(true));
        assert_eq!(first.value(CanonicalField::AiInvolvement), Some(true));
        assert_eq!(
            first
                .get(CanonicalField::AiInvolvement)
                .and_then(|c| c.note.as_deref()),
            Some("vendor model")
        );
        assert_eq!(first.value(CanonicalField::MonitoringControl), Some(false));
    }

    #[test]
    fn record_set_preserves_first_seen_order() {
        let mut set = RecordSet::new();
        set.merge(FunctionRecord::function("B"));
        set.merge(FunctionRecord::function("A"));
        set.merge(FunctionRecord::function("B"));
        let names: Vec<_> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn set_if_absent_does_not_override() {
        let mut record = FunctionRecord::function("Login");
        assert!(record.set_if_absent(CanonicalField::EmployerDeployment, CellValue::answer(true)));
        assert!(!record.set_if_absent(CanonicalField::EmployerDeployment, CellValue::answer(false)));
        assert_eq!(record.value(CanonicalField::EmployerDeployment), Some(true));
    }
}
