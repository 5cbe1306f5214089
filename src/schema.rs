//! Column schema: ordered, immutable column descriptors.
//!
//! Column identity is positional. Names are a secondary lookup key and need
//! not be unique; [`Schema::index_of`] returns the first match.

use std::sync::Arc;

use arrow_schema::{DataType as ArrowDataType, Schema as ArrowSchema, TimeUnit};
use rowscan_predicate::{ColumnSchema, DataType};

use crate::error::SchemaError;

/// Shared handle to an immutable schema.
pub type SchemaRef = Arc<Schema>;

/// Name and declared type of one column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    name: Arc<str>,
    data_type: DataType,
}

impl ColumnDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<Arc<str>>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// Ordered sequence of column descriptors, addressed by index `0..n`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Creates a schema from descriptors in column order.
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = ColumnDescriptor>,
    {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Converts an Arrow schema, mapping each field to a column descriptor.
    ///
    /// Supported field types: `Boolean`, `Int32`, `Int64`, `Float64`, `Utf8`,
    /// `Binary` and millisecond `Timestamp`.
    pub fn try_from_arrow(schema: &ArrowSchema) -> Result<Self, SchemaError> {
        let columns = schema
            .fields()
            .iter()
            .map(|field| {
                column_type_from_arrow(field.data_type())
                    .map(|data_type| ColumnDescriptor::new(field.name().as_str(), data_type))
                    .ok_or_else(|| SchemaError::UnsupportedArrowType {
                        field: field.name().clone(),
                        data_type: field.data_type().clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns })
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Descriptors in column order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Descriptor at `index`, if present.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// Declared type of the column at `index`.
    pub fn type_of(&self, index: i64) -> Result<DataType, SchemaError> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.columns.get(position))
            .map(ColumnDescriptor::data_type)
            .ok_or(SchemaError::OutOfRange {
                index,
                column_count: self.column_count(),
            })
    }

    /// Position of the first column named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name() == name)
    }

    /// Schema of rows projected onto `indices`; indices must be in range.
    pub(crate) fn project(&self, indices: &[usize]) -> Schema {
        Schema {
            columns: indices
                .iter()
                .filter_map(|index| self.columns.get(*index).cloned())
                .collect(),
        }
    }
}

impl ColumnSchema for Schema {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_type(&self, index: usize) -> Option<DataType> {
        self.columns.get(index).map(ColumnDescriptor::data_type)
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(ColumnDescriptor::name)
    }
}

pub(crate) fn column_type_from_arrow(data_type: &ArrowDataType) -> Option<DataType> {
    match data_type {
        ArrowDataType::Boolean => Some(DataType::Boolean),
        ArrowDataType::Int32 => Some(DataType::Int32),
        ArrowDataType::Int64 => Some(DataType::Int64),
        ArrowDataType::Float64 => Some(DataType::Float64),
        ArrowDataType::Utf8 => Some(DataType::Utf8),
        ArrowDataType::Binary => Some(DataType::Binary),
        ArrowDataType::Timestamp(TimeUnit::Millisecond, _) => Some(DataType::Timestamp),
        _ => None,
    }
}
