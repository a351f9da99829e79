//! Error types for the sampletrack engine.
//!
//! Classification and assembly errors are deliberately coarse: the engine's
//! policy is skip-and-continue, so errors are caught at the record boundary
//! and logged rather than aborting a whole tree computation.

use thiserror::Error;

/// The main error type for sampletrack operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// A raw status string matched none of the classification buckets.
    #[error("unrecognized sample status: '{status}'")]
    UnrecognizedStatus {
        /// The status string that could not be classified.
        status: String,
    },

    /// The external record source failed to produce the sample forest.
    #[error("record source error: {0}")]
    Source(String),
}

impl TrackerError {
    /// Creates an unrecognized-status error.
    #[must_use]
    pub fn unrecognized_status(status: impl Into<String>) -> Self {
        Self::UnrecognizedStatus {
            status: status.into(),
        }
    }

    /// Creates a record-source error.
    #[must_use]
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_status_display() {
        let err = TrackerError::unrecognized_status("Ready for - Teleportation");
        assert_eq!(
            err.to_string(),
            "unrecognized sample status: 'Ready for - Teleportation'"
        );
    }

    #[test]
    fn test_source_error_display() {
        let err = TrackerError::source("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
