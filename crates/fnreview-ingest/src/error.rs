//! Error types for document loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unsupported document format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// CSV file has no non-empty rows.
    #[error("CSV file is empty: {path}")]
    EmptyTable { path: PathBuf },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("/tmp/review.docx"),
            extension: "docx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported document format 'docx': /tmp/review.docx"
        );

        let err = IngestError::EmptyTable {
            path: PathBuf::from("table.csv"),
        };
        assert_eq!(err.to_string(), "CSV file is empty: table.csv");
    }
}
