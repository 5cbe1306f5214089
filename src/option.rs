use rowscan_predicate::Predicate;

/// Configuration of one row iteration: row window, predicate and projection.
///
/// Values are only recorded here; they are checked against the schema when
/// the iteration is built. Every setter replaces the previous value.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub(crate) from: Option<i64>,
    pub(crate) to: Option<i64>,
    pub(crate) predicate: Option<Predicate>,
    pub(crate) projection: Option<Vec<i64>>,
}

impl ScanOptions {
    /// First row position to produce, inclusive.
    pub fn rows_from(self, from: i64) -> Self {
        ScanOptions {
            from: Some(from),
            ..self
        }
    }

    /// Last row position to produce, inclusive.
    pub fn rows_to(self, to: i64) -> Self {
        ScanOptions {
            to: Some(to),
            ..self
        }
    }

    /// Both ends of the row window; `None` leaves that end open.
    pub fn range(self, from: Option<i64>, to: Option<i64>) -> Self {
        ScanOptions { from, to, ..self }
    }

    /// Predicate rows must satisfy.
    pub fn predicate(self, predicate: Predicate) -> Self {
        ScanOptions {
            predicate: Some(predicate),
            ..self
        }
    }

    /// Source columns to emit, in output order.
    pub fn projection(self, projection: impl IntoIterator<Item = i64>) -> Self {
        ScanOptions {
            projection: Some(projection.into_iter().collect()),
            ..self
        }
    }

    /// Configured lower bound, if any.
    pub fn lower_bound(&self) -> Option<i64> {
        self.from
    }

    /// Configured upper bound, if any.
    pub fn upper_bound(&self) -> Option<i64> {
        self.to
    }

    /// Configured predicate, if any.
    pub fn predicate_ref(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Configured projection, if any.
    pub fn projection_ref(&self) -> Option<&[i64]> {
        self.projection.as_deref()
    }
}
