//! Error types for keyframe
//!
//! Every error here is a logic or schema error detected eagerly while an
//! index or command is being built. Missing cells are not errors; they are
//! `None` in the optional-value model.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//! Keys are carried in their `Debug` rendering so that generic key types do
//! not leak into the error type.

use crate::lookup::Axis;
use crate::value::ValueKind;
use std::fmt::Debug;
use thiserror::Error;

/// Result type alias for keyframe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for keyframe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Exact lookup of a row key that is not in the index
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Column key is not in the column index
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Column key is in the column index but its slot holds no column
    #[error("Column has no value: {0}")]
    ColumnHasNoValue(String),

    /// Range restriction or nearest lookup on an unordered index
    #[error("Operation requires an ordered index: {0}")]
    OrderingRequired(String),

    /// Column key present on both sides of a join or append
    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    /// Row key present on both sides of an append that forbids overlap
    #[error("Duplicate row key: {0}")]
    DuplicateRowKey(String),

    /// Vector length disagrees with the index it is attached to
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length required by the index
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Typed access to a column of another element kind
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Requested element kind
        expected: ValueKind,
        /// Actual element kind
        actual: ValueKind,
    },

    /// Command refers to an argument or address that does not exist
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration could not be read or parsed
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a [`Error::KeyNotFound`] from any key
    pub fn key_not_found<K: Debug + ?Sized>(key: &K) -> Self {
        Error::KeyNotFound(format!("{:?}", key))
    }

    /// Build a [`Error::ColumnNotFound`] from any column key
    pub fn column_not_found<K: Debug + ?Sized>(key: &K) -> Self {
        Error::ColumnNotFound(format!("{:?}", key))
    }

    /// Build a [`Error::ColumnHasNoValue`] from any column key
    pub fn column_has_no_value<K: Debug + ?Sized>(key: &K) -> Self {
        Error::ColumnHasNoValue(format!("{:?}", key))
    }

    /// Build a [`Error::OrderingRequired`] naming the rejected operation
    pub fn ordering_required(operation: &str) -> Self {
        Error::OrderingRequired(operation.to_string())
    }

    /// Build the duplicate-key error matching the axis the collision occurred on
    pub fn duplicate_key<K: Debug + ?Sized>(axis: Axis, key: &K) -> Self {
        let key = format!("{:?}", key);
        match axis {
            Axis::Rows => Error::DuplicateRowKey(key),
            Axis::Columns => Error::DuplicateColumnKey(key),
        }
    }

    /// Whether this error is a key-space error (absent row or column key)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_) | Error::ColumnNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_key_not_found() {
        let err = Error::key_not_found(&42);
        let msg = err.to_string();
        assert!(msg.contains("Key not found"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_error_display_column_errors_are_distinct() {
        let missing = Error::column_not_found("x");
        let empty = Error::column_has_no_value("x");
        assert_ne!(missing, empty);
        assert!(missing.to_string().contains("\"x\""));
        assert!(empty.to_string().contains("no value"));
    }

    #[test]
    fn test_error_duplicate_key_follows_axis() {
        assert!(matches!(
            Error::duplicate_key(Axis::Rows, &1),
            Error::DuplicateRowKey(_)
        ));
        assert!(matches!(
            Error::duplicate_key(Axis::Columns, "a"),
            Error::DuplicateColumnKey(_)
        ));
    }

    #[test]
    fn test_error_display_length_mismatch() {
        let err = Error::LengthMismatch {
            expected: 3,
            actual: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::key_not_found(&1).is_not_found());
        assert!(Error::column_not_found(&1).is_not_found());
        assert!(!Error::ordering_required("range").is_not_found());
    }
}
