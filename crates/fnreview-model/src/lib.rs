#![deny(unsafe_code)]

pub mod decision;
pub mod document;
pub mod error;
pub mod field;
pub mod record;

pub use decision::{ReconciledField, SourceKind};
pub use document::{Document, DocumentTable, table_from_rows};
pub use error::{ConfigError, ExtractionFailure};
pub use field::{CanonicalField, CellValue};
pub use record::{FunctionRecord, RecordSet, SUBQUESTION_SEPARATOR, subquestion_name};
