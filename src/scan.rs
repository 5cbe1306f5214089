//! Validated scan plans.
//!
//! A [`ScanPlan`] is the checked form of [`ScanOptions`]: range bounds are
//! non-negative and ordered, the predicate fits the schema, and every
//! projected column exists. Only a plan can be turned into a [`RowStream`],
//! so no stream is ever built from unchecked configuration.

use std::sync::Arc;

use rowscan_predicate::Predicate;

use crate::{
    error::ScanError,
    observability::log_debug,
    option::ScanOptions,
    row::Row,
    schema::{Schema, SchemaRef},
    stream::{
        ColumnProjectionIter, PredicateFilterIter, RowIterator, RowRangeIter, RowStream,
        SourceIter,
    },
};

/// Checked iteration configuration, ready to be composed over a row source.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    from: usize,
    to: Option<usize>,
    predicate: Option<Predicate>,
    projection: Option<Arc<[usize]>>,
    output_schema: SchemaRef,
}

impl ScanPlan {
    /// Checks `options` against `schema`, in order: range, predicate, projection.
    ///
    /// The first failure is returned; nothing is partially applied.
    pub fn validate(schema: &Schema, options: &ScanOptions) -> Result<Self, ScanError> {
        let result = Self::check(schema, options);
        match &result {
            Ok(plan) => log_debug!(
                component = "plan",
                event = "scan_plan_built",
                from = plan.from,
                to = ?plan.to,
                predicate_columns = ?plan.predicate.as_ref().map(Predicate::referenced_columns),
                projection_width = plan.projection.as_ref().map(|columns| columns.len()),
            ),
            Err(err) => log_debug!(
                component = "plan",
                event = "scan_plan_rejected",
                error = %err,
            ),
        }
        result
    }

    fn check(schema: &Schema, options: &ScanOptions) -> Result<Self, ScanError> {
        let (from, to) = check_range(options.from, options.to)?;
        if let Some(predicate) = &options.predicate {
            predicate.validate(schema)?;
        }
        let projection = options
            .projection
            .as_deref()
            .map(|columns| check_projection(schema, columns))
            .transpose()?;
        let output_schema = match &projection {
            Some(columns) => Arc::new(schema.project(columns)),
            None => Arc::new(schema.clone()),
        };
        Ok(Self {
            from,
            to,
            predicate: options.predicate.clone(),
            projection,
            output_schema,
        })
    }

    /// First row position produced.
    #[must_use]
    pub fn start(&self) -> usize {
        self.from
    }

    /// Last row position produced, `None` when open-ended.
    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.to
    }

    /// Validated predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Validated projection, if any.
    #[must_use]
    pub fn projection(&self) -> Option<&[usize]> {
        self.projection.as_deref()
    }

    /// Schema of the rows the composed stream produces.
    #[must_use]
    pub fn output_schema(&self) -> &SchemaRef {
        &self.output_schema
    }

    /// Wraps `source`, innermost first, with the range, filter and projection stages.
    pub fn into_stream<'a, S>(self, source: S) -> RowStream<'a>
    where
        S: Iterator<Item = Row> + 'a,
    {
        let mut stream: Box<dyn RowIterator + 'a> =
            Box::new(RowRangeIter::new(SourceIter::new(source), self.from, self.to));
        if let Some(predicate) = self.predicate {
            stream = Box::new(PredicateFilterIter::new(stream, predicate));
        }
        if let Some(columns) = self.projection {
            stream = Box::new(ColumnProjectionIter::new(stream, columns));
        }
        RowStream::new(stream, self.output_schema)
    }
}

fn check_range(from: Option<i64>, to: Option<i64>) -> Result<(usize, Option<usize>), ScanError> {
    let from = check_bound("start", from)?;
    let to = check_bound("end", to)?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ScanError::InvalidArgument(format!(
                "range start after end: {from} > {to}"
            )));
        }
    }
    Ok((from.unwrap_or(0), to))
}

fn check_bound(name: &str, bound: Option<i64>) -> Result<Option<usize>, ScanError> {
    bound
        .map(|value| {
            usize::try_from(value).map_err(|_| {
                ScanError::InvalidArgument(format!(
                    "range {name} must be non-negative, got {value}"
                ))
            })
        })
        .transpose()
}

fn check_projection(schema: &Schema, columns: &[i64]) -> Result<Arc<[usize]>, ScanError> {
    let column_count = schema.column_count();
    columns
        .iter()
        .map(|&index| {
            usize::try_from(index)
                .ok()
                .filter(|position| *position < column_count)
                .ok_or(ScanError::IndexOutOfBounds {
                    index,
                    column_count,
                })
        })
        .collect()
}
