//! Pull-based row iterators and the composed scan stream.
//!
//! Every stage implements [`RowIterator`]: `has_next` may pull from the
//! wrapped stage to find out whether a row exists, and `next_row` hands that
//! row over or fails with [`ScanError::NoSuchElement`]. Stages never
//! materialize intermediate collections.

pub(crate) mod filter;
pub(crate) mod projection;
pub(crate) mod range;

use std::{
    fmt::{self, Debug, Formatter},
    iter::{Fuse, FusedIterator, Peekable},
};

pub use filter::PredicateFilterIter;
pub use projection::ColumnProjectionIter;
pub use range::RowRangeIter;

use crate::{error::ScanError, row::Row, schema::SchemaRef};

/// Forward-only, single-pass sequence of rows.
pub trait RowIterator {
    /// Returns true when `next_row` would produce a row.
    ///
    /// Repeated calls without an intervening `next_row` return the same
    /// answer, but may draw rows from the wrapped source.
    fn has_next(&mut self) -> bool;

    /// Produces the next row, or [`ScanError::NoSuchElement`] when exhausted.
    fn next_row(&mut self) -> Result<Row, ScanError>;
}

impl<T> RowIterator for Box<T>
where
    T: RowIterator + ?Sized,
{
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        (**self).next_row()
    }
}

/// Adapts any `Iterator<Item = Row>` into a [`RowIterator`].
pub struct SourceIter<I>
where
    I: Iterator<Item = Row>,
{
    inner: Peekable<Fuse<I>>,
}

impl<I> SourceIter<I>
where
    I: Iterator<Item = Row>,
{
    /// Wraps a base row source.
    pub fn new(source: I) -> Self {
        Self {
            inner: source.fuse().peekable(),
        }
    }
}

impl<I> RowIterator for SourceIter<I>
where
    I: Iterator<Item = Row>,
{
    fn has_next(&mut self) -> bool {
        self.inner.peek().is_some()
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        self.inner.next().ok_or(ScanError::NoSuchElement)
    }
}

/// Finalized, lazily evaluated row sequence produced by
/// [`RowIteratorBuilder::build`](crate::RowIteratorBuilder::build).
///
/// Also usable as a plain `Iterator<Item = Row>`.
pub struct RowStream<'a> {
    inner: Box<dyn RowIterator + 'a>,
    schema: SchemaRef,
}

impl<'a> RowStream<'a> {
    pub(crate) fn new(inner: Box<dyn RowIterator + 'a>, schema: SchemaRef) -> Self {
        Self { inner, schema }
    }

    /// Schema of the produced rows: the projected schema when a projection is
    /// configured, the source schema otherwise.
    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }
}

impl RowIterator for RowStream<'_> {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        self.inner.next_row()
    }
}

impl Iterator for RowStream<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.inner.has_next() {
            self.inner.next_row().ok()
        } else {
            None
        }
    }
}

impl FusedIterator for RowStream<'_> {}

impl Debug for RowStream<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStream")
            .field("columns", &self.schema.column_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::numbered_rows;

    #[test]
    fn source_iter_has_next_is_idempotent() {
        let mut source = SourceIter::new(numbered_rows(2));
        assert!(source.has_next());
        assert!(source.has_next());
        assert_eq!(source.next_row().expect("row").key().as_str(), "0");
        assert_eq!(source.next_row().expect("row").key().as_str(), "1");
        assert!(!source.has_next());
        assert!(!source.has_next());
        assert_eq!(source.next_row(), Err(ScanError::NoSuchElement));
    }

    #[test]
    fn next_row_without_has_next() {
        let mut source = SourceIter::new(numbered_rows(1));
        assert!(source.next_row().is_ok());
        assert_eq!(source.next_row(), Err(ScanError::NoSuchElement));
    }
}
