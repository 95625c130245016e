//! Error types for the optimizer.

use std::path::PathBuf;
use thiserror::Error;

/// Numeric error codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Non-positive or non-numeric input (-1)
    InvalidInput = -1,
    /// Record rejected by validation (-2)
    Validation = -2,
    /// Cylinder name already used (-10)
    DuplicateName = -10,
    /// Cylinder name not found (-11)
    NotFound = -11,
    /// Catalog file could not be read or parsed (-20)
    CatalogLoad = -20,
}

/// Main error type for the optimizer.
#[derive(Debug, Error)]
pub enum OptimError {
    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("A cylinder named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Cylinder not found: {name}")]
    NotFound { name: String },

    #[error("Failed to load catalog {path}: {message}")]
    CatalogLoad { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptimError {
    /// Build an `InvalidInput` error for a numeric field.
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        OptimError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OptimError::InvalidInput { .. } => ErrorCode::InvalidInput,
            OptimError::Validation(_) => ErrorCode::Validation,
            OptimError::DuplicateName { .. } => ErrorCode::DuplicateName,
            OptimError::NotFound { .. } => ErrorCode::NotFound,
            OptimError::CatalogLoad { .. } => ErrorCode::CatalogLoad,
            OptimError::Io(_) => ErrorCode::CatalogLoad,
            OptimError::Json(_) => ErrorCode::CatalogLoad,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = OptimError::invalid("label_width", "-3", "must be a positive number");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'label_width': must be a positive number (got '-3')"
        );
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    #[test]
    fn test_code_values() {
        let dup = OptimError::DuplicateName {
            name: "Z80".to_string(),
        };
        assert_eq!(dup.code_value(), -10);

        let missing = OptimError::NotFound {
            name: "Z80".to_string(),
        };
        assert_eq!(missing.code_value(), -11);

        let io = OptimError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.code(), ErrorCode::CatalogLoad);
    }
}
