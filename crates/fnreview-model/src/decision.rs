use serde::{Deserialize, Serialize};

/// Where a reconciled value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Document,
    Ai,
    Manual,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Document => "document",
            SourceKind::Ai => "ai",
            SourceKind::Manual => "manual",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative decision for one field of one function.
///
/// This is a pure projection of the document, AI and manual values and is
/// recomputed whenever one of them changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledField {
    pub canonical_value: Option<bool>,
    /// `None` when no source provided a value.
    pub source: Option<SourceKind>,
    pub agrees: bool,
    pub requires_manual_review: bool,
    /// Advisory: a sub-question reports technical availability while this
    /// field does not. Never set on other fields.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub subquestion_available: bool,
}
