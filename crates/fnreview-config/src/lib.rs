#![deny(unsafe_code)]

//! Extraction configuration, built once per run and shared by reference.

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod mode;
pub mod rule;

pub use catalog::{FunctionSpec, SubQuestionSpec};
pub use config::{ExtractionConfig, FieldPhrases, ReviewOptions};
pub use error::ConfigLoadError;
pub use loader::load_config;
pub use mode::{ExtractionMode, StrategyKind};
pub use rule::{Rule, RuleScope, sort_rules};
