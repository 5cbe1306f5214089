#![deny(missing_docs)]
//! Lazy, schema-validated row iteration over in-memory tables.
//!
//! A [`RowIteratorBuilder`] collects a row window, a typed predicate tree and
//! a column projection, checks all of them against the table's [`Schema`]
//! when [`build`](RowIteratorBuilder::build) is called, and then composes a
//! pull-based [`RowStream`]: range innermost, predicate filter next,
//! projection outermost. Nothing is read from the base rows until the
//! consumer pulls.
//!
//! ```ignore
//! use rowscan::{query::{col, eq, geq, leq}, Table};
//!
//! let rows = table
//!     .iterator_builder()
//!     .range(13, 17)
//!     .filter(
//!         geq(col::int(0), 10)
//!             .and(&leq(col::long(2), 20))
//!             .and(&eq(col::boolean(4), false)),
//!     )
//!     .build()?;
//! for row in rows {
//!     println!("{}", row.key());
//! }
//! ```

mod observability;

#[cfg(test)]
mod test_util;

/// Error types for schemas, tables and iteration.
pub mod error;

/// Column schema and Arrow schema conversion.
pub mod schema;

/// Rows and row keys.
pub mod row;

/// In-memory table used as a base row source.
pub mod table;

/// Iteration options.
pub mod option;

/// Validated scan plans.
pub mod scan;

/// Builder turning options into a row stream.
pub mod builder;

/// Row iterator stages.
pub mod stream;

/// Predicate construction, re-exported from `rowscan-predicate`.
pub mod query;

pub use crate::{
    builder::RowIteratorBuilder,
    error::{ScanError, SchemaError, TableError},
    option::ScanOptions,
    row::{Row, RowKey},
    scan::ScanPlan,
    schema::{ColumnDescriptor, Schema, SchemaRef},
    stream::{RowIterator, RowStream, SourceIter},
    table::{Table, TableRows},
};
