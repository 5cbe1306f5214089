//! Rows: a stable key plus one cell per schema column.

use std::{fmt, sync::Arc};

use rowscan_predicate::{RowCells, ScalarValue, ScalarValueRef};

/// Stable row identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey(Arc<str>);

impl RowKey {
    /// Creates a key.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// One record: cells positioned by the schema, and a key.
///
/// Cells are reference counted, so cloning a row is cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    key: RowKey,
    cells: Arc<[ScalarValue]>,
}

impl Row {
    /// Creates a row. `ScalarValue::Null` marks a missing cell.
    pub fn new(key: impl Into<RowKey>, cells: Vec<ScalarValue>) -> Self {
        Self {
            key: key.into(),
            cells: cells.into(),
        }
    }

    /// Row key.
    #[must_use]
    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// All cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[ScalarValue] {
        &self.cells
    }

    /// Cell at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScalarValue> {
        self.cells.get(index)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// New row holding the cells at `indices`, in that order, under the same key.
    ///
    /// Indices past the end yield missing cells.
    #[must_use]
    pub fn project(&self, indices: &[usize]) -> Row {
        Row {
            key: self.key.clone(),
            cells: indices
                .iter()
                .map(|index| self.cells.get(*index).cloned().unwrap_or(ScalarValue::Null))
                .collect(),
        }
    }
}

impl RowCells for Row {
    fn cell(&self, index: usize) -> Option<ScalarValueRef<'_>> {
        self.cells.get(index).map(ScalarValue::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use rowscan_predicate::ScalarValue;

    use super::*;

    #[test]
    fn project_keeps_key_and_picks_cells() {
        let row = Row::new(
            "7",
            vec![
                ScalarValue::Int32(7),
                ScalarValue::from("seven"),
                ScalarValue::Null,
            ],
        );
        let projected = row.project(&[1, 1, 0]);
        assert_eq!(projected.key().as_str(), "7");
        assert_eq!(
            projected.cells(),
            &[
                ScalarValue::from("seven"),
                ScalarValue::from("seven"),
                ScalarValue::Int32(7),
            ]
        );
        assert_eq!(row.len(), 3);
        assert_eq!(projected.cell(2), Some(ScalarValueRef::Int32(7)));
        assert_eq!(row.cell(2), Some(ScalarValueRef::Null));
        assert_eq!(row.cell(3), None);
    }

    #[test]
    fn clone_shares_cells() {
        let row = Row::new("a", vec![ScalarValue::Int64(1)]);
        let copy = row.clone();
        assert_eq!(row, copy);
        assert!(Arc::ptr_eq(&row.cells, &copy.cells));
    }
}
