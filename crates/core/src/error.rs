//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// malformed records, bad query parameters). IO concerns belong to the callers
/// that read files or terminals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed catalog document).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A query parameter had a value outside its vocabulary.
    #[error("invalid parameter `{name}`: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    /// A product record is missing a required field or carries a bad value.
    #[error("malformed record: field `{field}` {reason}")]
    MalformedRecord { field: &'static str, reason: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_parameter(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }

    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for malformed-record errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MalformedRecord { field, .. } => Some(field),
            _ => None,
        }
    }
}
