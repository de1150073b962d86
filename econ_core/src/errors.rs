//! # Error Types
//!
//! Structured error types for econ_core. Every failure is signalled directly
//! to the caller as a value; the core performs no logging and nothing is
//! fatal to a host process — each calculation is independent and a failure
//! affects only that single call.
//!
//! ## Example
//!
//! ```rust
//! use econ_core::errors::{EconError, EconResult};
//!
//! fn validate_storage(total_usable_af: f64) -> EconResult<()> {
//!     if total_usable_af == 0.0 {
//!         return Err(EconError::invalid_input(
//!             "total_usable_storage",
//!             total_usable_af.to_string(),
//!             "Total usable storage must be non-zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for econ_core operations
pub type EconResult<T> = Result<T, EconError>;

/// Structured error type for calculation operations.
///
/// Each variant carries enough context for a front end to build a
/// user-facing message without string parsing.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EconError {
    /// An input value is invalid (out of range, zero divisor, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Two paired sequences have different lengths
    #[error("Length mismatch for '{field}': expected {expected}, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// File I/O error while writing an exported workbook
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/CSV serialization failed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl EconError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EconError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a LengthMismatch error
    pub fn length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        EconError::LengthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EconError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EconError::InvalidInput { .. } => "INVALID_INPUT",
            EconError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            EconError::FileError { .. } => "FILE_ERROR",
            EconError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EconError::invalid_input("periods", "0", "Period count must be at least 1");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: EconError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EconError::length_mismatch("timings", 12, 6).error_code(),
            "LENGTH_MISMATCH"
        );
        assert_eq!(
            EconError::file_error("create", "out.csv", "denied").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_display_message() {
        let error = EconError::length_mismatch("timings", 12, 6);
        assert_eq!(
            error.to_string(),
            "Length mismatch for 'timings': expected 12, got 6"
        );
    }
}
