//! Error types for Seqflow
//!
//! Centralized error handling using thiserror. Errors raised by caller-supplied
//! operations are never wrapped in this enum; the combinators hand them back
//! untouched (or inside [`crate::RetryError`] for bounded retry).

use thiserror::Error;

/// Errors produced by Seqflow itself
#[derive(Debug, Error)]
pub enum SeqflowError {
    /// Malformed input rejected before any async work begins
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value failed validation
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for Seqflow operations
pub type Result<T> = std::result::Result<T, SeqflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = SeqflowError::InvalidArgument("times must be >= 0 (got -1)".to_string());
        assert_eq!(err.to_string(), "Invalid argument: times must be >= 0 (got -1)");
    }

    #[test]
    fn test_config_error() {
        let err = SeqflowError::Config("retry.times out of range".to_string());
        assert_eq!(err.to_string(), "Config error: retry.times out of range");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(SeqflowError::InvalidArgument("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
