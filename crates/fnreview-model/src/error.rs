//! Error taxonomy shared by configuration and extraction.

use thiserror::Error;

/// Fatal configuration problems detected while building lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two aliases normalize to the same text but target different fields.
    #[error("ambiguous alias '{alias}': already maps to {existing}, cannot also map to {conflicting}")]
    AmbiguousAlias {
        alias: String,
        existing: String,
        conflicting: String,
    },
}

/// A single strategy could not process the document.
///
/// The orchestrator logs these and continues with the next strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    /// Two header cells resolve to the same target column.
    #[error("table {table}: columns {first} and {second} both resolve to {target}")]
    DuplicateColumn {
        table: usize,
        target: String,
        first: usize,
        second: usize,
    },

    /// The input shape the strategy reads is missing.
    #[error("{strategy} strategy has no input: {what}")]
    MissingInput { strategy: String, what: String },
}

pub type Result<T> = std::result::Result<T, ExtractionFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::AmbiguousAlias {
            alias: "available".to_string(),
            existing: "technical_availability".to_string(),
            conflicting: "employer_deployment".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ambiguous alias 'available': already maps to technical_availability, \
             cannot also map to employer_deployment"
        );

        let err = ExtractionFailure::DuplicateColumn {
            table: 0,
            target: "employer_deployment".to_string(),
            first: 2,
            second: 3,
        };
        assert_eq!(
            err.to_string(),
            "table 0: columns 2 and 3 both resolve to employer_deployment"
        );
    }
}
