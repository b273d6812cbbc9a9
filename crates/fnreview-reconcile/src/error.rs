//! Errors raised by the collaborators around the engine.
//!
//! The engine itself never fails: disagreement is reported as a field that
//! requires manual review, not as an error.

use thiserror::Error;

use crate::store::DocumentVersion;

/// Failure of the AI assessment collaborator for one question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    #[error("assessment backend failed: {reason}")]
    Backend { reason: String },

    #[error("assessment returned an empty response")]
    EmptyResponse,
}

/// Failure of the review store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no review data stored for document version {version}")]
    UnknownVersion { version: DocumentVersion },

    #[error("review store failed: {reason}")]
    Backend { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UnknownVersion {
            version: DocumentVersion(3),
        };
        assert_eq!(err.to_string(), "no review data stored for document version v3");

        let err = AssessError::Backend {
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "assessment backend failed: timeout");
    }
}
