//! Error types for schemas, tables, and row iteration.

use rowscan_predicate::{DataType, ValidationError};
use thiserror::Error;

/// Errors raised while finalizing or draining a row iteration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// Malformed range bounds, or a comparison the column's type cannot serve.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A predicate or projection references a column outside the schema.
    #[error("column index {index} out of bounds for schema with {column_count} columns")]
    IndexOutOfBounds {
        /// Offending column position.
        index: i64,
        /// Number of columns in the schema.
        column_count: usize,
    },
    /// `next_row` was called with no row available.
    #[error("no such element: row iterator is exhausted")]
    NoSuchElement,
}

impl From<ValidationError> for ScanError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::ColumnIndexOutOfRange {
                index,
                column_count,
            } => ScanError::IndexOutOfBounds {
                index,
                column_count,
            },
            err @ ValidationError::IncompatibleType { .. } => {
                ScanError::InvalidArgument(err.to_string())
            }
        }
    }
}

/// Errors raised by schema lookups and conversions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Column position outside `[0, column_count)`.
    #[error("column index {index} out of range for schema with {column_count} columns")]
    OutOfRange {
        /// Requested position.
        index: i64,
        /// Number of columns in the schema.
        column_count: usize,
    },
    /// Arrow field whose type has no column type counterpart.
    #[error("unsupported arrow type {data_type:?} for field '{field}'")]
    UnsupportedArrowType {
        /// Field name.
        field: String,
        /// Arrow type of the field.
        data_type: arrow_schema::DataType,
    },
}

/// Errors raised while loading rows into a table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Row width differs from the schema's column count.
    #[error("row '{key}' has {actual} cells, schema expects {expected}")]
    ArityMismatch {
        /// Row key.
        key: String,
        /// Column count of the schema.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A present cell's type differs from the column's declared type.
    #[error("row '{key}' column '{column}' expects {declared}, got {actual}")]
    TypeMismatch {
        /// Row key.
        key: String,
        /// Column name.
        column: String,
        /// Declared type of the column.
        declared: DataType,
        /// Type of the supplied cell.
        actual: DataType,
    },
    /// Key column missing from the record batch schema.
    #[error("unknown key column '{0}'")]
    UnknownKeyColumn(String),
    /// Key column is not a UTF-8 column.
    #[error("key column '{column}' must be utf8, got {data_type:?}")]
    InvalidKeyColumn {
        /// Key column name.
        column: String,
        /// Arrow type of the key column.
        data_type: arrow_schema::DataType,
    },
    /// Key column holds a null at the given row.
    #[error("key column '{column}' is null at row {row}")]
    NullKey {
        /// Key column name.
        column: String,
        /// Row position in the batch.
        row: usize,
    },
    /// Arrow array does not match the type its field declares.
    #[error("array for column '{column}' does not match declared type {declared}")]
    ArrayMismatch {
        /// Column name.
        column: String,
        /// Declared column type.
        declared: DataType,
    },
    /// Schema conversion failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
