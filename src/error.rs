//! Error types for reshaping operations

use thiserror::Error;

/// Errors raised by reshaping operations.
///
/// Every variant carries enough context (row line, column name) to
/// locate the offending data in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    /// A named column does not exist in the input table
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    /// A predicate selector matched no columns where at least one is required
    #[error("selector matched no columns")]
    EmptySelection,

    /// An operation would produce two columns with the same name
    #[error("duplicate column name: {column}")]
    DuplicateColumn { column: String },

    /// separate produced the wrong number of pieces for a row
    #[error(
        "row {line}: splitting column '{column}' produced {found} piece(s), expected {expected}"
    )]
    SplitArityMismatch {
        line: usize,
        column: String,
        expected: usize,
        found: usize,
    },

    /// pivot_wider found more than one row for an (id-group, name) pair
    #[error(
        "duplicate key: rows {first_line} and {second_line} both map to id '{key}' with name '{name}'"
    )]
    DuplicateKey {
        key: String,
        name: String,
        first_line: usize,
        second_line: usize,
    },
}

pub type Result<T> = std::result::Result<T, ReshapeError>;
