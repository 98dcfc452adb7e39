//! Error types for notification mapping.

use crate::types::{Path, ValueType};
use thiserror::Error;

/// Main error type for mapping operations.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Unhandled message kind: {kind}")]
    UnhandledMessageKind { kind: String },

    #[error("Response carries no update payload")]
    MissingUpdatePayload,

    #[error("Malformed JSON value at {path}: {reason}")]
    MalformedJsonValue { path: Path, reason: String },

    #[error("Node {element} is a leaf (expected a branch traversing {path})")]
    TypeConflict { element: String, path: Path },

    #[error("Unsupported value type {value_type:?} at {path}")]
    UnsupportedValueType { value_type: ValueType, path: Path },

    #[error("Unknown response variant: {kind}")]
    UnknownResponseVariant { kind: String },

    #[error("Slice length {slice} is greater than the timestamp length ({digits}) or 10")]
    SliceTooLong { slice: usize, digits: usize },

    #[error("Timestamp length {digits} is too long (greater than 19)")]
    TimestampTooLong { digits: usize },

    #[error("Slice length must be at least one digit")]
    EmptySlice,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Document splitter failed: {0}")]
    Splitter(String),
}

impl MapperError {
    /// True for errors raised by timestamp splitting, which callers
    /// recover from with the system clock.
    pub fn is_timestamp_error(&self) -> bool {
        matches!(
            self,
            MapperError::SliceTooLong { .. }
                | MapperError::TimestampTooLong { .. }
                | MapperError::EmptySlice
        )
    }
}

impl From<serde_json::Error> for MapperError {
    fn from(e: serde_json::Error) -> Self {
        MapperError::Serialization(e.to_string())
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_errors_are_classified() {
        assert!(MapperError::SliceTooLong { slice: 10, digits: 2 }.is_timestamp_error());
        assert!(MapperError::TimestampTooLong { digits: 20 }.is_timestamp_error());
        assert!(MapperError::EmptySlice.is_timestamp_error());
        assert!(!MapperError::MissingUpdatePayload.is_timestamp_error());
    }

    #[test]
    fn test_type_conflict_message_names_path() {
        let err = MapperError::TypeConflict {
            element: "a".to_string(),
            path: Path::from(["a", "b"]),
        };
        assert_eq!(
            err.to_string(),
            "Node a is a leaf (expected a branch traversing /a/b)"
        );
    }
}
