//! Predicate surface for row iteration.
//!
//! Re-exports the `rowscan-predicate` crate so callers can build filters
//! without depending on it directly:
//!
//! ```ignore
//! use rowscan::query::{col, eq, geq};
//!
//! let pred = geq(col::int(0), 10).and(&eq(col::boolean(4), false));
//! ```

pub use rowscan_predicate::{
    col, eq, geq, gt, leq, lt, neq, udf, Column, ColumnRef, ColumnSchema, ColumnValue,
    ComparisonOp, DataType, Predicate, PredicateNode, RowCells, ScalarValue, ScalarValueRef,
    Timestamp, UserPredicate, ValidationError,
};
