//! Persistence contract for review inputs.

use std::collections::BTreeMap;
use std::fmt;

use fnreview_config::ReviewOptions;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::engine::ReconciliationEngine;
use crate::error::StoreError;
use crate::inputs::ReviewInputs;
use crate::report::ReconciliationReport;

/// Version number of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentVersion(pub u32);

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Stores the last known document, AI and manual values per version.
pub trait ReviewStore {
    fn load(&self, version: DocumentVersion) -> Result<ReviewInputs, StoreError>;

    fn save(&mut self, version: DocumentVersion, inputs: ReviewInputs) -> Result<(), StoreError>;
}

/// In-process store keyed by version.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    versions: BTreeMap<DocumentVersion, ReviewInputs>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<DocumentVersion> {
        self.versions.keys().next_back().copied()
    }

    pub fn versions(&self) -> impl Iterator<Item = DocumentVersion> + '_ {
        self.versions.keys().copied()
    }
}

impl ReviewStore for MemoryStore {
    fn load(&self, version: DocumentVersion) -> Result<ReviewInputs, StoreError> {
        self.versions
            .get(&version)
            .cloned()
            .ok_or(StoreError::UnknownVersion { version })
    }

    fn save(&mut self, version: DocumentVersion, inputs: ReviewInputs) -> Result<(), StoreError> {
        self.versions.insert(version, inputs);
        Ok(())
    }
}

/// Reconciles one stored version.
///
/// Only that version's inputs are read, so overrides entered for an earlier
/// version do not carry over.
pub fn reconcile_version(
    store: &dyn ReviewStore,
    version: DocumentVersion,
    options: ReviewOptions,
) -> Result<ReconciliationReport, StoreError> {
    let span = info_span!("reconcile_version", %version);
    let _guard = span.enter();
    let inputs = store.load(version)?;
    Ok(ReconciliationEngine::new(options).reconcile(&inputs))
}
