//! Typed column accessors.
//!
//! An accessor pairs a column position with the Rust type the caller wants to
//! read from it. The accessor type doubles as the literal type of comparisons,
//! which is what schema validation checks against the declared column type.

use std::{fmt, marker::PhantomData};

use super::{DataType, ScalarValue, ScalarValueRef, Timestamp};

/// Rust types that can be read out of a cell through a typed column accessor.
pub trait ColumnValue: Into<ScalarValue> + Sized {
    /// Type requested from the column.
    const DATA_TYPE: DataType;

    /// Reads the value from a cell, returning `None` for missing or unreadable cells.
    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self>;
}

impl ColumnValue for bool {
    const DATA_TYPE: DataType = DataType::Boolean;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        cell.as_bool()
    }
}

impl ColumnValue for i32 {
    const DATA_TYPE: DataType = DataType::Int32;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        match cell {
            ScalarValueRef::Int32(value) => Some(value),
            _ => None,
        }
    }
}

impl ColumnValue for i64 {
    const DATA_TYPE: DataType = DataType::Int64;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        cell.as_i64()
    }
}

impl ColumnValue for f64 {
    const DATA_TYPE: DataType = DataType::Float64;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        cell.as_f64()
    }
}

impl ColumnValue for String {
    const DATA_TYPE: DataType = DataType::Utf8;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        cell.as_utf8().map(str::to_owned)
    }
}

impl ColumnValue for Vec<u8> {
    const DATA_TYPE: DataType = DataType::Binary;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        cell.as_binary().map(<[u8]>::to_vec)
    }
}

impl ColumnValue for Timestamp {
    const DATA_TYPE: DataType = DataType::Timestamp;

    fn from_cell(cell: ScalarValueRef<'_>) -> Option<Self> {
        match cell {
            ScalarValueRef::Timestamp(millis) => Some(Timestamp::from_millis(millis)),
            _ => None,
        }
    }
}

/// Typed reference to a column by position.
///
/// The index is signed so that callers can express any position; indices
/// outside the schema are rejected by validation, not at construction.
pub struct Column<T> {
    index: i64,
    _value: PhantomData<fn() -> T>,
}

impl<T: ColumnValue> Column<T> {
    /// Creates an accessor for the column at `index`.
    #[must_use]
    pub const fn new(index: i64) -> Self {
        Self {
            index,
            _value: PhantomData,
        }
    }

    /// Position of the column.
    #[must_use]
    pub const fn index(&self) -> i64 {
        self.index
    }

    /// Untyped form stored inside predicate trees.
    #[must_use]
    pub fn to_ref(&self) -> ColumnRef {
        ColumnRef {
            index: self.index,
            data_type: T::DATA_TYPE,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T: ColumnValue> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("index", &self.index)
            .field("data_type", &T::DATA_TYPE)
            .finish()
    }
}

/// Column position plus the type it is read as, as recorded in a predicate leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Position of the column; may be out of range until validated.
    pub index: i64,
    /// Type the column is read as.
    pub data_type: DataType,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col{}", self.index)
    }
}

/// Reads the column as a 32-bit integer.
#[must_use]
pub const fn int(index: i64) -> Column<i32> {
    Column::new(index)
}

/// Reads the column as a 64-bit integer.
#[must_use]
pub const fn long(index: i64) -> Column<i64> {
    Column::new(index)
}

/// Reads the column as a 64-bit float.
#[must_use]
pub const fn double(index: i64) -> Column<f64> {
    Column::new(index)
}

/// Reads the column as a UTF-8 string.
#[must_use]
pub const fn string(index: i64) -> Column<String> {
    Column::new(index)
}

/// Reads the column as a boolean.
#[must_use]
pub const fn boolean(index: i64) -> Column<bool> {
    Column::new(index)
}

/// Reads the column as a binary blob.
#[must_use]
pub const fn binary(index: i64) -> Column<Vec<u8>> {
    Column::new(index)
}

/// Reads the column as a timestamp.
#[must_use]
pub const fn timestamp(index: i64) -> Column<Timestamp> {
    Column::new(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_carry_their_read_type() {
        assert_eq!(int(0).to_ref().data_type, DataType::Int32);
        assert_eq!(long(2).to_ref().data_type, DataType::Int64);
        assert_eq!(boolean(4).to_ref().data_type, DataType::Boolean);
        assert_eq!(timestamp(-1).index(), -1);
        assert_eq!(string(3).to_ref().to_string(), "col3");
    }

    #[test]
    fn widening_reads_from_cells() {
        assert_eq!(i64::from_cell(ScalarValueRef::Int32(5)), Some(5));
        assert_eq!(f64::from_cell(ScalarValueRef::Int64(2)), Some(2.0));
        assert_eq!(i32::from_cell(ScalarValueRef::Int64(2)), None);
        assert_eq!(bool::from_cell(ScalarValueRef::Null), None);
        assert_eq!(
            Timestamp::from_cell(ScalarValueRef::Timestamp(10)),
            Some(Timestamp::from_millis(10))
        );
    }
}
