use thiserror::Error;

use super::{ComparisonOp, DataType};

/// Reason a predicate tree does not fit a schema.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A leaf references a column position outside the schema.
    #[error("column index {index} out of range for schema with {column_count} columns")]
    ColumnIndexOutOfRange {
        /// Offending column position.
        index: i64,
        /// Number of columns in the schema.
        column_count: usize,
    },
    /// A comparison reads a column as a type, or with an operator, the column does not support.
    #[error(
        "column '{column}' (index {index}) of type {declared} cannot be compared as {requested} \
         using `{op}`"
    )]
    IncompatibleType {
        /// Name of the column.
        column: String,
        /// Position of the column.
        index: usize,
        /// Declared type of the column.
        declared: DataType,
        /// Type the comparison reads the column as.
        requested: DataType,
        /// Comparison operator.
        op: ComparisonOp,
    },
}
