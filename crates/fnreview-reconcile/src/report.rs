use std::collections::BTreeMap;

use fnreview_model::{CanonicalField, ReconciledField, SourceKind};
use serde::{Deserialize, Serialize};

/// Reconciled fields of one function or sub-question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecision {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub fields: BTreeMap<CanonicalField, ReconciledField>,
    pub negotiable: bool,
}

impl FunctionDecision {
    pub fn get(&self, field: CanonicalField) -> Option<&ReconciledField> {
        self.fields.get(&field)
    }

    pub fn requires_manual_review(&self) -> bool {
        self.fields.values().any(|field| field.requires_manual_review)
    }
}

/// A field where document and AI disagree and no reviewer has decided yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub function: String,
    pub field: CanonicalField,
    pub document: bool,
    pub ai: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub functions: Vec<FunctionDecision>,
    pub conflicts: Vec<Conflict>,
}

impl ReconciliationReport {
    pub fn function(&self, name: &str) -> Option<&FunctionDecision> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn get(&self, name: &str, field: CanonicalField) -> Option<&ReconciledField> {
        self.function(name)?.get(field)
    }

    pub fn review_count(&self) -> usize {
        self.conflicts.len()
    }

    pub fn agreement_count(&self) -> usize {
        self.fields().filter(|field| field.agrees).count()
    }

    pub fn undecided_count(&self) -> usize {
        self.fields()
            .filter(|field| field.canonical_value.is_none())
            .count()
    }

    /// Number of decided fields per winning source.
    pub fn source_counts(&self) -> BTreeMap<SourceKind, usize> {
        let mut counts = BTreeMap::new();
        for source in self.fields().filter_map(|field| field.source) {
            *counts.entry(source).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    fn fields(&self) -> impl Iterator<Item = &ReconciledField> {
        self.functions
            .iter()
            .flat_map(|function| function.fields.values())
    }
}
