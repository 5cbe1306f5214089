//! Fluent construction of row iterations.

use rowscan_predicate::Predicate;

use crate::{
    error::ScanError,
    option::ScanOptions,
    row::Row,
    scan::ScanPlan,
    schema::Schema,
    stream::RowStream,
};

/// Accumulates iteration options over a schema and a base row source.
///
/// Configuration calls may come in any order and any number of times; the
/// last write wins. [`build`](Self::build) consumes the builder, so each
/// builder produces at most one stream. All checks run in `build`, before any
/// row is drawn from the source.
///
/// ```ignore
/// let rows = table
///     .iterator_builder()
///     .range(13, 17)
///     .filter(geq(col::int(0), 10).and(&eq(col::boolean(4), false)))
///     .build()?;
/// ```
pub struct RowIteratorBuilder<'a, S> {
    schema: &'a Schema,
    source: S,
    options: ScanOptions,
}

impl<'a, S> RowIteratorBuilder<'a, S>
where
    S: Iterator<Item = Row> + 'a,
{
    /// Starts a builder over `source`, whose rows follow `schema`.
    pub fn new(schema: &'a Schema, source: S) -> Self {
        Self {
            schema,
            source,
            options: ScanOptions::default(),
        }
    }

    /// Skips rows before position `from` of the source.
    #[must_use]
    pub fn rows_from(mut self, from: i64) -> Self {
        self.options = self.options.rows_from(from);
        self
    }

    /// Stops after position `to` of the source.
    #[must_use]
    pub fn rows_to(mut self, to: i64) -> Self {
        self.options = self.options.rows_to(to);
        self
    }

    /// Restricts output to source positions `from..=to`.
    #[must_use]
    pub fn range(mut self, from: i64, to: i64) -> Self {
        self.options = self.options.range(Some(from), Some(to));
        self
    }

    /// Keeps only rows `predicate` accepts.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.options = self.options.predicate(predicate);
        self
    }

    /// Emits only the given source columns, in the given order.
    #[must_use]
    pub fn project(mut self, columns: impl IntoIterator<Item = i64>) -> Self {
        self.options = self.options.projection(columns);
        self
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Options configured so far.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Validates the current options without consuming the builder.
    pub fn plan(&self) -> Result<ScanPlan, ScanError> {
        ScanPlan::validate(self.schema, &self.options)
    }

    /// Validates the options and composes the lazy row stream.
    ///
    /// Fails with [`ScanError::InvalidArgument`] for bad range bounds or
    /// type-incompatible comparisons, and with
    /// [`ScanError::IndexOutOfBounds`] for unknown predicate or projection
    /// columns. No rows are drawn from the source on failure.
    pub fn build(self) -> Result<RowStream<'a>, ScanError> {
        let plan = ScanPlan::validate(self.schema, &self.options)?;
        Ok(plan.into_stream(self.source))
    }
}
