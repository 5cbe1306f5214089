//! Filtered scan over an Arrow batch, with structured logging.
//!
//! Run: cargo run --example filter_scan
//!
//! With plan and exhaustion events:
//!   RUST_LOG=rowscan=trace cargo run --example filter_scan

use std::sync::Arc;

use arrow_array::{ArrayRef, BooleanArray, Float64Array, Int32Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use rowscan::{
    query::{col, eq, geq, leq, udf},
    RowIterator, Table,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn orders() -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("quantity", DataType::Int32, false),
        Field::new("customer", DataType::Utf8, true),
        Field::new("price", DataType::Float64, false),
        Field::new("shipped", DataType::Boolean, false),
    ]));
    let ids: Vec<String> = (0..20).map(|i| format!("order-{i:02}")).collect();
    let quantities: Vec<i32> = (0..20).map(|i| (i * 7) % 13).collect();
    let customers: Vec<Option<&str>> = (0..20)
        .map(|i| match i % 4 {
            0 => Some("acme"),
            1 => Some("globex"),
            2 => None,
            _ => Some("initech"),
        })
        .collect();
    let prices: Vec<f64> = (0..20i32).map(|i| 9.5 + f64::from(i)).collect();
    let shipped: Vec<bool> = (0..20).map(|i| i % 3 == 0).collect();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(Int32Array::from(quantities)),
        Arc::new(StringArray::from(customers)),
        Arc::new(Float64Array::from(prices)),
        Arc::new(BooleanArray::from(shipped)),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rowscan=debug")))
        .init();

    let table = Table::try_from_record_batch(&orders()?, Some("id"))?;

    // Unshipped orders of at least 5 items among the first 15, priced as double.
    let pending = geq(col::int(1), 5)
        .and(&eq(col::boolean(4), false))
        .and(&leq(col::double(3), 25.0));
    let mut rows = table
        .iterator_builder()
        .range(0, 14)
        .filter(pending)
        .project([0, 1, 3])
        .build()?;

    let names: Vec<&str> = rows
        .schema()
        .columns()
        .iter()
        .map(|column| column.name())
        .collect();
    println!("columns: {}", names.join(", "));
    while rows.has_next() {
        let row = rows.next_row()?;
        let cells: Vec<String> = row.cells().iter().map(ToString::to_string).collect();
        println!("{}: {}", row.key(), cells.join(" | "));
    }

    // Missing customers are handed to the closure as `None`.
    let anonymous = table
        .iterator_builder()
        .filter(udf(col::string(2), |customer| customer.is_none()))
        .build()?
        .count();
    println!("orders without customer: {anonymous}");

    // Rejected before any row is read.
    match table.iterator_builder().filter(eq(col::boolean(1), true)).build() {
        Ok(_) => println!("unexpected: plan accepted"),
        Err(err) => println!("rejected: {err}"),
    }

    Ok(())
}
