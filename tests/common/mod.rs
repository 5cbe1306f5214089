//! Common test utilities for integration tests.

#![allow(dead_code)]

use rowscan::{
    query::{DataType, ScalarValue},
    ColumnDescriptor, Row, RowIterator, RowStream, Schema, Table,
};

/// `int: Int32, string: Utf8, long: Int64, double: Float64, boolean: Boolean`.
pub fn schema() -> Schema {
    Schema::new([
        ColumnDescriptor::new("int", DataType::Int32),
        ColumnDescriptor::new("string", DataType::Utf8),
        ColumnDescriptor::new("long", DataType::Int64),
        ColumnDescriptor::new("double", DataType::Float64),
        ColumnDescriptor::new("boolean", DataType::Boolean),
    ])
}

/// Table of `rows` rows; row `i` holds `i` in every numeric column, `"i"` as
/// key and string, and `true` in the boolean column when `i` is odd.
pub fn numbered_table(rows: usize) -> Table {
    let mut table = Table::new(schema());
    for i in 0..rows {
        table
            .push_row(
                i.to_string(),
                vec![
                    ScalarValue::Int32(i as i32),
                    ScalarValue::Utf8(i.to_string()),
                    ScalarValue::Int64(i as i64),
                    ScalarValue::Float64(i as f64),
                    ScalarValue::Boolean(i % 2 == 1),
                ],
            )
            .expect("row matches schema");
    }
    table
}

/// Drains `stream` through `has_next`/`next_row`, returning row keys.
pub fn drain_keys(mut stream: RowStream<'_>) -> Vec<String> {
    let mut keys = Vec::new();
    while stream.has_next() {
        keys.push(stream.next_row().expect("row after has_next").key().to_string());
    }
    keys
}

/// Keys of `rows`.
pub fn keys(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|row| row.key().to_string()).collect()
}
