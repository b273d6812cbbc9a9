#![deny(unsafe_code)]

//! Reconciliation of extracted document values with AI assessments and
//! reviewer overrides.

pub mod assessment;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod report;
pub mod store;

pub use assessment::{
    AiAnswer, Assessment, AssessmentBatch, AssessmentFailure, AssessmentRequest, Assessor,
    collect_assessments,
};
pub use engine::{ReconciliationEngine, reconcile, reconcile_field};
pub use error::{AssessError, StoreError};
pub use inputs::{FieldInputs, FunctionInputs, ReviewInputs};
pub use report::{Conflict, FunctionDecision, ReconciliationReport};
pub use store::{DocumentVersion, MemoryStore, ReviewStore, reconcile_version};
