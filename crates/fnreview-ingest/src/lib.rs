#![deny(unsafe_code)]

//! Document loading for function review.
//!
//! Office containers are converted upstream; this crate reads the two shapes
//! the extractors consume (tables and a text body) from plain files.

mod csv_table;
mod document;
mod error;

pub use csv_table::read_csv_table;
pub use document::{load_document, load_table_with_text};
pub use error::{IngestError, Result};
