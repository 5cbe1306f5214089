use rowscan_predicate::Predicate;

use crate::{
    error::ScanError,
    observability::log_trace,
    row::Row,
    stream::RowIterator,
};

/// Passes through only the rows a validated predicate accepts.
///
/// `has_next` pulls ahead until it finds an accepted row, which is held in
/// `pending` until `next_row` hands it out.
pub struct PredicateFilterIter<I> {
    inner: I,
    predicate: Predicate,
    pending: Option<Row>,
    examined: u64,
    rejected: u64,
    exhausted: bool,
}

impl<I> PredicateFilterIter<I>
where
    I: RowIterator,
{
    /// Wraps `inner`. `predicate` must already have been validated against
    /// the schema of the rows `inner` produces.
    pub fn new(inner: I, predicate: Predicate) -> Self {
        Self {
            inner,
            predicate,
            pending: None,
            examined: 0,
            rejected: 0,
            exhausted: false,
        }
    }

    /// Number of rows rejected by the predicate so far.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl<I> RowIterator for PredicateFilterIter<I>
where
    I: RowIterator,
{
    fn has_next(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        if self.exhausted {
            return false;
        }
        while self.inner.has_next() {
            let Ok(row) = self.inner.next_row() else {
                break;
            };
            self.examined += 1;
            if self.predicate.evaluate(&row) {
                self.pending = Some(row);
                return true;
            }
            self.rejected += 1;
        }
        self.exhausted = true;
        log_trace!(
            component = "filter",
            event = "filter_exhausted",
            examined = self.examined,
            rejected = self.rejected,
        );
        false
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        if self.has_next() {
            self.pending.take().ok_or(ScanError::NoSuchElement)
        } else {
            Err(ScanError::NoSuchElement)
        }
    }
}

#[cfg(test)]
mod tests {
    use rowscan_predicate::{col, eq, geq, udf};

    use super::*;
    use crate::{stream::SourceIter, test_util::numbered_rows};

    #[test]
    fn keeps_matching_rows_in_order() {
        let mut iter = PredicateFilterIter::new(
            SourceIter::new(numbered_rows(10)),
            geq(col::int(0), 4).and(&eq(col::boolean(4), true)),
        );
        let mut keys = Vec::new();
        while iter.has_next() {
            keys.push(iter.next_row().expect("row").key().to_string());
        }
        assert_eq!(keys, vec!["5", "7", "9"]);
        assert_eq!(iter.rejected(), 7);
    }

    #[test]
    fn has_next_holds_one_row() {
        let mut iter = PredicateFilterIter::new(
            SourceIter::new(numbered_rows(10)),
            eq(col::int(0), 3),
        );
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(iter.rejected(), 3);
        assert_eq!(iter.next_row().expect("row").key().as_str(), "3");
        assert!(!iter.has_next());
        assert_eq!(iter.rejected(), 9);
    }

    #[test]
    fn rejecting_everything_is_empty() {
        let mut iter =
            PredicateFilterIter::new(SourceIter::new(numbered_rows(5)), udf(col::int(0), |_| false));
        assert!(!iter.has_next());
        assert_eq!(iter.next_row(), Err(ScanError::NoSuchElement));
    }

    #[test]
    fn next_row_pulls_without_has_next() {
        let mut iter = PredicateFilterIter::new(
            SourceIter::new(numbered_rows(6)),
            geq(col::int(0), 4),
        );
        assert_eq!(iter.next_row().expect("row").key().as_str(), "4");
        assert_eq!(iter.next_row().expect("row").key().as_str(), "5");
        assert_eq!(iter.next_row(), Err(ScanError::NoSuchElement));
    }
}
