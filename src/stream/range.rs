use crate::{
    error::ScanError,
    observability::log_trace,
    row::Row,
    stream::RowIterator,
};

/// Passes through only the rows whose position in the wrapped sequence lies
/// in `[from, to]`.
///
/// Positions count rows drawn from the wrapped sequence, starting at zero.
/// Rows before `from` are drawn and discarded; once the position passes `to`
/// the iterator is exhausted and stops drawing.
pub struct RowRangeIter<I> {
    inner: I,
    from: usize,
    to: Option<usize>,
    position: usize,
    exhausted: bool,
}

impl<I> RowRangeIter<I>
where
    I: RowIterator,
{
    /// Wraps `inner`; `to: None` leaves the upper end open.
    pub fn new(inner: I, from: usize, to: Option<usize>) -> Self {
        Self {
            inner,
            from,
            to,
            position: 0,
            exhausted: false,
        }
    }

    /// Number of rows drawn from the wrapped sequence so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.position
    }

    fn finish(&mut self) -> bool {
        if !self.exhausted {
            self.exhausted = true;
            log_trace!(
                component = "range",
                event = "range_exhausted",
                consumed = self.position,
            );
        }
        false
    }
}

impl<I> RowIterator for RowRangeIter<I>
where
    I: RowIterator,
{
    fn has_next(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        while self.position < self.from {
            if !self.inner.has_next() || self.inner.next_row().is_err() {
                return self.finish();
            }
            self.position += 1;
        }
        if self.to.is_some_and(|to| self.position > to) || !self.inner.has_next() {
            return self.finish();
        }
        true
    }

    fn next_row(&mut self) -> Result<Row, ScanError> {
        if !self.has_next() {
            return Err(ScanError::NoSuchElement);
        }
        let row = self.inner.next_row()?;
        self.position += 1;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{stream::SourceIter, test_util::numbered_rows};

    fn keys<I: RowIterator>(mut iter: I) -> Vec<String> {
        let mut keys = Vec::new();
        while iter.has_next() {
            keys.push(iter.next_row().expect("row").key().to_string());
        }
        keys
    }

    #[test]
    fn yields_inclusive_window() {
        let iter = RowRangeIter::new(SourceIter::new(numbered_rows(10)), 3, Some(5));
        assert_eq!(keys(iter), vec!["3", "4", "5"]);
    }

    #[test]
    fn open_ends_default_to_whole_sequence() {
        let iter = RowRangeIter::new(SourceIter::new(numbered_rows(4)), 0, None);
        assert_eq!(keys(iter), vec!["0", "1", "2", "3"]);

        let iter = RowRangeIter::new(SourceIter::new(numbered_rows(4)), 2, None);
        assert_eq!(keys(iter), vec!["2", "3"]);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let mut iter = RowRangeIter::new(SourceIter::new(numbered_rows(4)), 7, Some(9));
        assert!(!iter.has_next());
        assert_eq!(iter.consumed(), 4);
        assert_eq!(iter.next_row(), Err(ScanError::NoSuchElement));
    }

    #[test]
    fn stops_drawing_after_upper_bound() {
        let mut drawn = 0usize;
        let source = numbered_rows(100).inspect(|_| drawn += 1);
        let mut iter = RowRangeIter::new(SourceIter::new(source), 1, Some(2));
        assert_eq!(iter.next_row().expect("row").key().as_str(), "1");
        assert_eq!(iter.next_row().expect("row").key().as_str(), "2");
        assert!(!iter.has_next());
        assert_eq!(iter.next_row(), Err(ScanError::NoSuchElement));
        assert_eq!(iter.consumed(), 3);
        drop(iter);
        // The peeking source may look one row ahead of the window.
        assert!(drawn <= 4);
    }

    #[test]
    fn single_row_window() {
        let iter = RowRangeIter::new(SourceIter::new(numbered_rows(10)), 6, Some(6));
        assert_eq!(keys(iter), vec!["6"]);
    }

    #[test]
    fn randomized_windows_match_slices() {
        let mut rng = fastrand::Rng::with_seed(17);
        for _ in 0..200 {
            let len = rng.usize(0..30);
            let from = rng.usize(0..35);
            let to = from + rng.usize(0..10);
            let iter = RowRangeIter::new(SourceIter::new(numbered_rows(len)), from, Some(to));
            let expected: Vec<String> = (from..=to)
                .filter(|position| *position < len)
                .map(|position| position.to_string())
                .collect();
            assert_eq!(keys(iter), expected);
        }
    }
}
