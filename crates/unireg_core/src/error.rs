//! Error types for the records core.

use crate::entity::EntityKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
///
/// Not-found and already-exists conditions are not errors; registry
/// operations report them through [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// An identifier does not match the format required for its entity kind.
    #[error("invalid {kind} ID format: {value:?}")]
    InvalidId {
        /// The kind of entity the identifier was meant for.
        kind: EntityKind,
        /// The rejected value.
        value: String,
    },

    /// A field value failed validation.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the failure.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A persisted document could not be decoded.
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        /// The document that failed to decode.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// State could not be encoded.
    #[error("encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CoreError {
    /// Creates an invalid ID error.
    pub fn invalid_id(kind: EntityKind, value: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            value: value.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a decode error for the given document.
    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Returns true for format and range rejections raised before any mutation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidId { .. } | Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_message_names_kind() {
        let err = CoreError::invalid_id(EntityKind::Student, "X12");
        assert_eq!(err.to_string(), "invalid student ID format: \"X12\"");
        assert!(err.is_validation());
    }

    #[test]
    fn io_is_not_validation() {
        let err = CoreError::from(io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert!(!err.is_validation());
    }
}
