//! Error types for ralph-loop
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in ralph-loop
#[derive(Debug, Error)]
pub enum RalphError {
    /// A loop is already running in this workspace
    #[error("A ralph loop is already active. Cancel it before starting a new one.")]
    AlreadyActive,

    /// A mutating operation was called with no loop running
    #[error("No active ralph loop. Initialize one first.")]
    NoActiveLoop,

    /// IO error from persistence
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ralph-loop operations
pub type Result<T> = std::result::Result<T, RalphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_active_error() {
        let err = RalphError::AlreadyActive;
        assert!(err.to_string().contains("already active"));
    }

    #[test]
    fn test_no_active_loop_error() {
        let err = RalphError::NoActiveLoop;
        assert!(err.to_string().contains("No active ralph loop"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RalphError = io_err.into();
        assert!(matches!(err, RalphError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: RalphError = json_err.into();
        assert!(matches!(err, RalphError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(RalphError::NoActiveLoop)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
