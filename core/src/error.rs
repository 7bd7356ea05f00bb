//! Error types for the scanrelay-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for scanrelay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or running the external scanner.
#[derive(Error, Debug)]
pub enum Error {
    /// The scanner module could not be imported from the project root.
    #[error("Scanner not found in {}: {reason}", .root.display())]
    ScannerNotFound { root: PathBuf, reason: String },

    /// The interpreter hosting the scanner could not be located.
    #[error("Interpreter not found: {0}")]
    InterpreterNotFound(String),

    /// The scanner ran but exited unsuccessfully.
    #[error("Scan failed: {0}")]
    ScanFailed(String),

    /// Failed to spawn or talk to the scanner process.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse scanner output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true for failures that mean the server cannot start at all.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Error::ScannerNotFound { .. } | Error::InterpreterNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_fatal_classification() {
        let missing = Error::ScannerNotFound {
            root: PathBuf::from("/opt/scanner"),
            reason: "No module named 'main'".to_string(),
        };
        assert!(missing.is_startup_fatal());
        assert!(Error::InterpreterNotFound("python3".to_string()).is_startup_fatal());
        assert!(!Error::ScanFailed("exit status 1".to_string()).is_startup_fatal());
    }

    #[test]
    fn test_scanner_not_found_message() {
        let err = Error::ScannerNotFound {
            root: PathBuf::from("/opt/scanner"),
            reason: "No module named 'main'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Scanner not found in /opt/scanner: No module named 'main'"
        );
    }
}
