#![deny(missing_docs)]
//! Typed predicate trees for the rowscan pipeline.
//!
//! A predicate is an immutable tree of column comparisons, caller-supplied
//! cell tests, and binary `AND`/`OR` nodes. Trees are checked once against a
//! column schema with [`Predicate::validate`] and then evaluated row by row
//! with [`Predicate::evaluate`]; evaluation never fails and treats missing
//! cells as non-matching.

mod core;

pub use self::core::{
    eq, geq, gt, leq, lt, neq, udf, Column, ColumnRef, ColumnSchema, ColumnValue, ComparisonOp,
    DataType, Predicate, PredicateNode, RowCells, ScalarValue, ScalarValueRef, Timestamp,
    UserPredicate, ValidationError,
};

/// Typed column accessors: `col::int(0)`, `col::boolean(4)`, ...
pub mod col {
    pub use crate::core::column::{binary, boolean, double, int, long, string, timestamp};
}
