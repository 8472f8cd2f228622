//! Error types for dictum-state operations.
//!
//! A missing path is never an error: lookups report absence through `Option`,
//! `bool` or a caller-supplied default. Errors only come from typed conversions
//! and from composite operations that meet a value of the wrong kind.

use crate::Path;
use thiserror::Error;

/// Result type alias for dictum-state operations.
pub type DictumResult<T> = Result<T, DictumError>;

/// Errors that can occur during dictum-state operations.
#[derive(Debug, Error)]
pub enum DictumError {
    /// A value has a different kind than the operation requires.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The path where the mismatch occurred.
        path: Path,
        /// The expected kind.
        expected: &'static str,
        /// The kind actually stored.
        found: &'static str,
    },

    /// Numeric operation on a non-numeric value.
    #[error("numeric operation requires number at {path}")]
    NumericOperationOnNonNumber {
        /// The path where the non-numeric value was found.
        path: Path,
    },

    /// Append operation requires a sequence.
    #[error("append requires array value at {path}")]
    AppendRequiresArray {
        /// The path where a non-array was found.
        path: Path,
    },

    /// Invalid operation error.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DictumError {
    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(path: Path, expected: &'static str, found: &'static str) -> Self {
        DictumError::TypeMismatch {
            path,
            expected,
            found,
        }
    }

    /// Create a numeric operation on non-number error.
    #[inline]
    pub fn numeric_on_non_number(path: Path) -> Self {
        DictumError::NumericOperationOnNonNumber { path }
    }

    /// Create an append requires array error.
    #[inline]
    pub fn append_requires_array(path: Path) -> Self {
        DictumError::AppendRequiresArray { path }
    }

    /// Create an invalid operation error.
    #[inline]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        DictumError::InvalidOperation {
            message: message.into(),
        }
    }
}

/// Get the kind name of a stored value.
#[inline]
pub fn value_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
