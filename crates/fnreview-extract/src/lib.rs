#![deny(unsafe_code)]

//! Function extraction from review documents.
//!
//! Three strategies read a [`Document`](fnreview_model::Document): tables by
//! column header, free text by priority rules, and free text by phrases. The
//! [`ExtractionOrchestrator`] runs them in the configured order.

pub mod cell;
pub mod orchestrator;
pub mod phrase;
pub mod rule;
pub mod segment;
pub mod strategy;
pub mod table;

pub use cell::{leading_answer, parse_cell};
pub use orchestrator::{ExtractionOrchestrator, ExtractionOutcome, extract};
pub use phrase::PhraseExtractor;
pub use rule::RuleExtractor;
pub use segment::{Segment, Segmenter};
pub use strategy::{Strategy, build_strategy};
pub use table::TableExtractor;
