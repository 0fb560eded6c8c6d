//! Domain error model.

use thiserror::Error;

/// Result type used across the decision layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input/validation failures. Transport and
/// runtime concerns belong to the API crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input field was absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field was present but held an unusable value.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A computation produced a value that cannot be used (NaN, infinity).
    #[error("computation failed: {0}")]
    Computation(String),
}

impl DomainError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }
}
