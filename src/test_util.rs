//! Test-only fixtures: a five-column schema and rows derived from a position.

use rowscan_predicate::{DataType, ScalarValue};

use crate::{
    row::Row,
    schema::{ColumnDescriptor, Schema},
    table::Table,
};

/// `int: Int32, string: Utf8, long: Int64, double: Float64, boolean: Boolean`.
pub(crate) fn sample_schema() -> Schema {
    Schema::new([
        ColumnDescriptor::new("int", DataType::Int32),
        ColumnDescriptor::new("string", DataType::Utf8),
        ColumnDescriptor::new("long", DataType::Int64),
        ColumnDescriptor::new("double", DataType::Float64),
        ColumnDescriptor::new("boolean", DataType::Boolean),
    ])
}

/// Row `i` under [`sample_schema`]: every numeric cell holds `i`, the key and
/// string cell hold `i` in decimal, and the boolean cell is true for odd `i`.
pub(crate) fn sample_row(i: usize) -> Row {
    let value = i as i64;
    Row::new(
        i.to_string(),
        vec![
            ScalarValue::Int32(value as i32),
            ScalarValue::Utf8(i.to_string()),
            ScalarValue::Int64(value),
            ScalarValue::Float64(value as f64),
            ScalarValue::Boolean(i % 2 == 1),
        ],
    )
}

/// Rows `0..n` of [`sample_row`].
pub(crate) fn numbered_rows(n: usize) -> impl Iterator<Item = Row> {
    (0..n).map(sample_row)
}

/// Table over [`sample_schema`] holding rows `0..n`.
pub(crate) fn sample_table(n: usize) -> Table {
    let mut table = Table::new(sample_schema());
    for row in numbered_rows(n) {
        table
            .push(row)
            .expect("sample rows match the sample schema");
    }
    table
}
