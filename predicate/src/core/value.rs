use std::{cmp::Ordering, fmt};

/// Declared type of a column, and the literal type requested by a typed column accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean flag.
    Boolean,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    Utf8,
    /// Opaque binary blob.
    Binary,
    /// Milliseconds since the Unix epoch (UTC).
    Timestamp,
}

impl DataType {
    /// Returns a textual representation of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Utf8 => "utf8",
            DataType::Binary => "binary",
            DataType::Timestamp => "timestamp",
        }
    }

    /// Returns true when cells declared as `self` can be read as `target`.
    ///
    /// Reads may widen integers into wider integers or floats, and timestamps
    /// may be read as their raw millisecond count. No other conversion exists.
    #[must_use]
    pub fn can_read_as(self, target: DataType) -> bool {
        use DataType::*;
        self == target
            || matches!(
                (self, target),
                (Int32, Int64) | (Int32, Float64) | (Int64, Float64) | (Timestamp, Int64)
            )
    }

    /// Returns true when values of this type have a natural total ordering.
    #[must_use]
    pub fn is_ordered(self) -> bool {
        !matches!(self, DataType::Binary)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point in time stored as milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

/// Owned cell or literal value. `Null` is the missing-value marker.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// Missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Binary blob.
    Binary(Vec<u8>),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
}

impl ScalarValue {
    /// Returns true when the value is the missing marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Type of the value, or `None` for a missing value.
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        self.as_ref().data_type()
    }

    /// Returns a borrowed view over this value.
    #[must_use]
    pub fn as_ref(&self) -> ScalarValueRef<'_> {
        match self {
            ScalarValue::Null => ScalarValueRef::Null,
            ScalarValue::Boolean(value) => ScalarValueRef::Boolean(*value),
            ScalarValue::Int32(value) => ScalarValueRef::Int32(*value),
            ScalarValue::Int64(value) => ScalarValueRef::Int64(*value),
            ScalarValue::Float64(value) => ScalarValueRef::Float64(*value),
            ScalarValue::Utf8(value) => ScalarValueRef::Utf8(value.as_str()),
            ScalarValue::Binary(value) => ScalarValueRef::Binary(value.as_slice()),
            ScalarValue::Timestamp(value) => ScalarValueRef::Timestamp(*value),
        }
    }

    /// Compares this value with another, returning the ordering when both sides are comparable.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        self.as_ref().compare(other.as_ref())
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_ref(), f)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int32(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_owned())
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        ScalarValue::Binary(value)
    }
}

impl From<&[u8]> for ScalarValue {
    fn from(value: &[u8]) -> Self {
        ScalarValue::Binary(value.to_vec())
    }
}

impl From<Timestamp> for ScalarValue {
    fn from(value: Timestamp) -> Self {
        ScalarValue::Timestamp(value.as_millis())
    }
}

impl<T> From<Option<T>> for ScalarValue
where
    T: Into<ScalarValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Null, Into::into)
    }
}

/// Borrowed view over a cell or literal value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValueRef<'a> {
    /// Missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string slice.
    Utf8(&'a str),
    /// Binary slice.
    Binary(&'a [u8]),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
}

impl<'a> ScalarValueRef<'a> {
    /// Returns true when the value is the missing marker.
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self, ScalarValueRef::Null)
    }

    /// Type of the value, or `None` for a missing value.
    #[must_use]
    pub fn data_type(self) -> Option<DataType> {
        match self {
            ScalarValueRef::Null => None,
            ScalarValueRef::Boolean(_) => Some(DataType::Boolean),
            ScalarValueRef::Int32(_) => Some(DataType::Int32),
            ScalarValueRef::Int64(_) => Some(DataType::Int64),
            ScalarValueRef::Float64(_) => Some(DataType::Float64),
            ScalarValueRef::Utf8(_) => Some(DataType::Utf8),
            ScalarValueRef::Binary(_) => Some(DataType::Binary),
            ScalarValueRef::Timestamp(_) => Some(DataType::Timestamp),
        }
    }

    /// Integer view used for cross-width comparisons.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            ScalarValueRef::Int32(value) => Some(i64::from(value)),
            ScalarValueRef::Int64(value) | ScalarValueRef::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    /// Floating point view used when either side of a comparison is a float.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ScalarValueRef::Int32(value) => Some(f64::from(value)),
            // lossy above 2^53
            ScalarValueRef::Int64(value) => Some(value as f64),
            ScalarValueRef::Float64(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ScalarValueRef::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_utf8(self) -> Option<&'a str> {
        match self {
            ScalarValueRef::Utf8(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the binary payload, if any.
    #[must_use]
    pub fn as_binary(self) -> Option<&'a [u8]> {
        match self {
            ScalarValueRef::Binary(value) => Some(value),
            _ => None,
        }
    }

    /// Compares this value with another using the natural ordering of their types.
    ///
    /// Returns `None` when either side is missing, when the types are unrelated,
    /// or when a float comparison involves NaN.
    pub fn compare(self, other: ScalarValueRef<'_>) -> Option<Ordering> {
        use ScalarValueRef::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Boolean(lhs), Boolean(rhs)) => Some(lhs.cmp(&rhs)),
            (Utf8(lhs), Utf8(rhs)) => Some(lhs.cmp(rhs)),
            (Binary(lhs), Binary(rhs)) => Some(lhs.cmp(rhs)),
            (ScalarValueRef::Timestamp(lhs), ScalarValueRef::Timestamp(rhs)) => Some(lhs.cmp(&rhs)),
            (Float64(_), _) | (_, Float64(_)) => {
                let (lhs, rhs) = (self.as_f64()?, other.as_f64()?);
                lhs.partial_cmp(&rhs)
            }
            _ => {
                let (lhs, rhs) = (self.as_i64()?, other.as_i64()?);
                Some(lhs.cmp(&rhs))
            }
        }
    }

    /// Copies the borrowed view into an owned value.
    #[must_use]
    pub fn to_scalar(self) -> ScalarValue {
        match self {
            ScalarValueRef::Null => ScalarValue::Null,
            ScalarValueRef::Boolean(value) => ScalarValue::Boolean(value),
            ScalarValueRef::Int32(value) => ScalarValue::Int32(value),
            ScalarValueRef::Int64(value) => ScalarValue::Int64(value),
            ScalarValueRef::Float64(value) => ScalarValue::Float64(value),
            ScalarValueRef::Utf8(value) => ScalarValue::Utf8(value.to_owned()),
            ScalarValueRef::Binary(value) => ScalarValue::Binary(value.to_vec()),
            ScalarValueRef::Timestamp(value) => ScalarValue::Timestamp(value),
        }
    }
}

impl<'a> From<&'a ScalarValue> for ScalarValueRef<'a> {
    fn from(value: &'a ScalarValue) -> Self {
        value.as_ref()
    }
}

impl fmt::Display for ScalarValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValueRef::Null => f.write_str("NULL"),
            ScalarValueRef::Boolean(value) => write!(f, "{value}"),
            ScalarValueRef::Int32(value) => write!(f, "{value}"),
            ScalarValueRef::Int64(value) => write!(f, "{value}"),
            ScalarValueRef::Float64(value) => write!(f, "{value}"),
            ScalarValueRef::Utf8(value) => write!(f, "'{value}'"),
            ScalarValueRef::Binary(value) => write!(f, "<{} bytes>", value.len()),
            ScalarValueRef::Timestamp(value) => write!(f, "ts({value})"),
        }
    }
}
