//! In-memory table: the base row source iterations are built over.

use std::{iter::FusedIterator, slice, vec};

use arrow_array::{
    cast::AsArray,
    types::{Float64Type, Int32Type, Int64Type, TimestampMillisecondType},
    Array, RecordBatch, StringArray,
};
use rowscan_predicate::{DataType, ScalarValue, Timestamp};

use crate::{
    builder::RowIteratorBuilder,
    error::TableError,
    observability::log_debug,
    row::{Row, RowKey},
    schema::{ColumnDescriptor, Schema, SchemaRef},
};

/// Rows in insertion order under one fixed schema.
#[derive(Clone, Debug)]
pub struct Table {
    schema: SchemaRef,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(schema: impl Into<SchemaRef>) -> Self {
        Self {
            schema: schema.into(),
            rows: Vec::new(),
        }
    }

    /// Loads every row of an Arrow batch.
    ///
    /// Row keys are read from `key_column`, which must be a non-null Utf8
    /// column and stays part of the schema; without one, the row position is
    /// the key.
    pub fn try_from_record_batch(
        batch: &RecordBatch,
        key_column: Option<&str>,
    ) -> Result<Self, TableError> {
        let schema = Schema::try_from_arrow(&batch.schema())?;
        let keys = key_column
            .map(|name| key_array(batch, name).map(|array| (name, array)))
            .transpose()?;

        let mut columns = schema
            .columns()
            .iter()
            .zip(batch.columns())
            .map(|(column, array)| column_cells(column, array.as_ref()).map(Vec::into_iter))
            .collect::<Result<Vec<vec::IntoIter<ScalarValue>>, _>>()?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for position in 0..batch.num_rows() {
            let key = match keys {
                Some((name, array)) => {
                    if array.is_null(position) {
                        return Err(TableError::NullKey {
                            column: name.to_owned(),
                            row: position,
                        });
                    }
                    RowKey::new(array.value(position))
                }
                None => RowKey::new(position.to_string()),
            };
            let cells = columns
                .iter_mut()
                .map(|cells| cells.next().unwrap_or(ScalarValue::Null))
                .collect();
            rows.push(Row::new(key, cells));
        }

        log_debug!(
            component = "table",
            event = "table_loaded",
            rows = rows.len(),
            columns = schema.column_count(),
            key_column = ?key_column,
        );
        Ok(Self {
            schema: SchemaRef::new(schema),
            rows,
        })
    }

    /// Column schema shared by every row.
    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row built from `key` and `cells`.
    pub fn push_row(
        &mut self,
        key: impl Into<RowKey>,
        cells: Vec<ScalarValue>,
    ) -> Result<(), TableError> {
        self.push(Row::new(key, cells))
    }

    /// Appends `row` after checking its width and the type of every present cell.
    pub fn push(&mut self, row: Row) -> Result<(), TableError> {
        let expected = self.schema.column_count();
        if row.len() != expected {
            return Err(TableError::ArityMismatch {
                key: row.key().to_string(),
                expected,
                actual: row.len(),
            });
        }
        for (column, cell) in self.schema.columns().iter().zip(row.cells()) {
            if let Some(actual) = cell.data_type() {
                if actual != column.data_type() {
                    return Err(TableError::TypeMismatch {
                        key: row.key().to_string(),
                        column: column.name().to_owned(),
                        declared: column.data_type(),
                        actual,
                    });
                }
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Rows in insertion order. Each row is a cheap clone.
    pub fn rows(&self) -> TableRows<'_> {
        TableRows {
            inner: self.rows.iter(),
        }
    }

    /// Starts an iteration over all rows of this table.
    pub fn iterator_builder(&self) -> RowIteratorBuilder<'_, TableRows<'_>> {
        RowIteratorBuilder::new(&self.schema, self.rows())
    }
}

/// Forward-only iterator over a table's rows; see [`Table::rows`].
#[derive(Clone, Debug)]
pub struct TableRows<'a> {
    inner: slice::Iter<'a, Row>,
}

impl Iterator for TableRows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.inner.next().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for TableRows<'_> {
    fn next_back(&mut self) -> Option<Row> {
        self.inner.next_back().cloned()
    }
}

impl ExactSizeIterator for TableRows<'_> {}

impl FusedIterator for TableRows<'_> {}

fn key_array<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b StringArray, TableError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| TableError::UnknownKeyColumn(name.to_owned()))?;
    array
        .as_string_opt::<i32>()
        .ok_or_else(|| TableError::InvalidKeyColumn {
            column: name.to_owned(),
            data_type: array.data_type().clone(),
        })
}

fn column_cells(
    column: &ColumnDescriptor,
    array: &dyn Array,
) -> Result<Vec<ScalarValue>, TableError> {
    let mismatch = || TableError::ArrayMismatch {
        column: column.name().to_owned(),
        declared: column.data_type(),
    };
    let cells: Vec<ScalarValue> = match column.data_type() {
        DataType::Boolean => array
            .as_boolean_opt()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Int32 => array
            .as_primitive_opt::<Int32Type>()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Int64 => array
            .as_primitive_opt::<Int64Type>()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Float64 => array
            .as_primitive_opt::<Float64Type>()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Utf8 => array
            .as_string_opt::<i32>()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Binary => array
            .as_binary_opt::<i32>()
            .ok_or_else(mismatch)?
            .iter()
            .map(ScalarValue::from)
            .collect(),
        DataType::Timestamp => array
            .as_primitive_opt::<TimestampMillisecondType>()
            .ok_or_else(mismatch)?
            .iter()
            .map(|millis| ScalarValue::from(millis.map(Timestamp::from_millis)))
            .collect(),
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_array::{
        ArrayRef, BinaryArray, BooleanArray, Float64Array, Int32Array, Int64Array,
        TimestampMillisecondArray,
    };
    use arrow_schema::{DataType as ArrowDataType, Field, Schema as ArrowSchema, TimeUnit};
    use rowscan_predicate::{col, eq, gt, RowCells, ScalarValueRef};

    use super::*;
    use crate::{error::SchemaError, test_util::sample_table};

    fn batch() -> RecordBatch {
        let schema = Arc::new(ArrowSchema::new(vec![
            Field::new("id", ArrowDataType::Utf8, true),
            Field::new("score", ArrowDataType::Int32, true),
            Field::new("flag", ArrowDataType::Boolean, false),
            Field::new(
                "at",
                ArrowDataType::Timestamp(TimeUnit::Millisecond, None),
                false,
            ),
            Field::new("blob", ArrowDataType::Binary, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["a", "b", "c"])),
            Arc::new(Int32Array::from(vec![Some(3), None, Some(9)])),
            Arc::new(BooleanArray::from(vec![true, false, true])),
            Arc::new(TimestampMillisecondArray::from(vec![10, 20, 30])),
            Arc::new(BinaryArray::from_opt_vec(vec![
                Some(&b"x"[..]),
                None,
                Some(&b"z"[..]),
            ])),
        ];
        RecordBatch::try_new(schema, columns).expect("record batch")
    }

    #[test]
    fn push_checks_arity_and_types() {
        let mut table = sample_table(2);
        assert_eq!(table.len(), 2);

        let err = table
            .push_row("short", vec![ScalarValue::Int32(1)])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::ArityMismatch {
                key: "short".to_owned(),
                expected: 5,
                actual: 1,
            }
        );

        let err = table
            .push_row(
                "bad",
                vec![
                    ScalarValue::Int64(1),
                    ScalarValue::Null,
                    ScalarValue::Null,
                    ScalarValue::Null,
                    ScalarValue::Null,
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::TypeMismatch {
                declared: DataType::Int32,
                actual: DataType::Int64,
                ..
            }
        ));

        table
            .push_row("missing", vec![ScalarValue::Null; 5])
            .expect("missing cells are accepted");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn rows_follow_insertion_order() {
        let table = sample_table(4);
        let rows = table.rows();
        assert_eq!(rows.len(), 4);
        let keys: Vec<String> = rows.map(|row| row.key().to_string()).collect();
        assert_eq!(keys, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn iterator_builder_scans_the_table() {
        let table = sample_table(10);
        let keys: Vec<String> = table
            .iterator_builder()
            .filter(gt(col::long(2), 6))
            .build()
            .expect("valid scan")
            .map(|row| row.key().to_string())
            .collect();
        assert_eq!(keys, vec!["7", "8", "9"]);
        assert!(!table.is_empty());
    }

    #[test]
    fn loads_record_batch_with_key_column() {
        let table = Table::try_from_record_batch(&batch(), Some("id")).expect("table");
        assert_eq!(table.len(), 3);
        assert_eq!(table.schema().type_of(3), Ok(DataType::Timestamp));

        let rows: Vec<Row> = table.rows().collect();
        assert_eq!(rows[1].key().as_str(), "b");
        assert_eq!(rows[1].cell(0), Some(ScalarValueRef::Utf8("b")));
        assert_eq!(rows[1].cell(1), Some(ScalarValueRef::Null));
        assert_eq!(rows[1].cell(4), Some(ScalarValueRef::Null));
        assert_eq!(rows[2].get(3), Some(&ScalarValue::Timestamp(30)));
        assert_eq!(rows[0].get(4), Some(&ScalarValue::Binary(b"x".to_vec())));

        let flagged: Vec<String> = table
            .iterator_builder()
            .filter(eq(col::boolean(2), true))
            .build()
            .expect("valid scan")
            .map(|row| row.key().to_string())
            .collect();
        assert_eq!(flagged, vec!["a", "c"]);
    }

    #[test]
    fn positional_keys_without_key_column() {
        let table = Table::try_from_record_batch(&batch(), None).expect("table");
        let keys: Vec<String> = table.rows().map(|row| row.key().to_string()).collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
    }

    #[test]
    fn rejects_bad_key_columns() {
        assert_eq!(
            Table::try_from_record_batch(&batch(), Some("nope")).unwrap_err(),
            TableError::UnknownKeyColumn("nope".to_owned())
        );
        assert!(matches!(
            Table::try_from_record_batch(&batch(), Some("score")),
            Err(TableError::InvalidKeyColumn { .. })
        ));

        let schema = Arc::new(ArrowSchema::new(vec![Field::new(
            "id",
            ArrowDataType::Utf8,
            true,
        )]));
        let with_null = RecordBatch::try_new(
            schema,
            vec![Arc::new(StringArray::from(vec![Some("a"), None])) as ArrayRef],
        )
        .expect("record batch");
        assert_eq!(
            Table::try_from_record_batch(&with_null, Some("id")).unwrap_err(),
            TableError::NullKey {
                column: "id".to_owned(),
                row: 1,
            }
        );
    }

    #[test]
    fn rejects_unsupported_arrow_types() {
        let schema = Arc::new(ArrowSchema::new(vec![
            Field::new("a", ArrowDataType::Int64, false),
            Field::new("b", ArrowDataType::Float64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1])),
            Arc::new(Float64Array::from(vec![1.5])),
        ];
        let batch = RecordBatch::try_new(schema, columns).expect("record batch");
        assert!(Table::try_from_record_batch(&batch, None).is_ok());

        let schema = Arc::new(ArrowSchema::new(vec![Field::new(
            "u",
            ArrowDataType::UInt8,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(arrow_array::UInt8Array::from(vec![1u8])) as ArrayRef],
        )
        .expect("record batch");
        assert!(matches!(
            Table::try_from_record_batch(&batch, None),
            Err(TableError::Schema(SchemaError::UnsupportedArrowType { .. }))
        ));
    }
}
