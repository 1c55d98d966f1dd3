//! Error types for pii-redact.
//!
//! Only batch-level failures are errors. Problems with a single record are
//! absorbed by the pipeline and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a batch run.
#[derive(Debug, Error)]
pub enum RedactError {
    /// Input CSV does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RedactError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            RedactError::InputNotFound(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_message_and_code() {
        let err = RedactError::InputNotFound(PathBuf::from("missing.csv"));
        assert_eq!(err.to_string(), "Input file not found: missing.csv");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_other_errors_exit_one() {
        let err = RedactError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(err.exit_code(), 1);
    }
}
