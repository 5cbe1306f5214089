use std::sync::Arc;

use crate::{error::ScanError, row::Row, stream::RowIterator};

/// Remaps every row onto a chosen sequence of source columns.
///
/// Columns may be repeated or reordered. Row keys pass through unchanged.
pub struct ColumnProjectionIter<I> {
    inner: I,
    columns: Arc<[usize]>,
}

impl<I> ColumnProjectionIter<I>
where
    I: RowIterator,
{
    /// Wraps `inner`. Every index in `columns` must be a valid position in the
    /// rows `inner` produces.
    pub fn new(inner: I, columns: impl Into<Arc<[usize]>>) -> Self {
        Self {
            inner,
            columns: columns.into(),
        }
    }

    /// Source column positions, in output order.
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

impl<I> RowIterator for ColumnProjectionIter<I>
where
    I: RowIterator,
{
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        self.inner.next_row().map(|row| row.project(&self.columns))
    }
}
