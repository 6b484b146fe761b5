//! Arrow cell extraction helpers.
//!
//! Input tables come from CSV type inference or arbitrary Parquet writers, so
//! identifier and code columns may be integers, floats, booleans or strings.
//! Everything is rendered to text here; comparison-time normalisation is the
//! caller's concern.

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray, StringViewArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::StoreError;

/// Render one cell as a string. `Ok(None)` for nulls.
pub fn cell_to_string(
    column: &str,
    col: &dyn Array,
    row: usize,
) -> Result<Option<String>, StoreError> {
    if col.is_null(row) {
        return Ok(None);
    }

    macro_rules! render {
        ($ty:ty) => {
            col.as_any()
                .downcast_ref::<$ty>()
                .map(|arr| arr.value(row).to_string())
        };
    }

    let value = match col.data_type() {
        DataType::Utf8 => render!(StringArray),
        DataType::LargeUtf8 => render!(LargeStringArray),
        DataType::Utf8View => render!(StringViewArray),
        DataType::Int64 => render!(Int64Array),
        DataType::Int32 => render!(Int32Array),
        DataType::UInt64 => render!(UInt64Array),
        DataType::UInt32 => render!(UInt32Array),
        DataType::Float64 => render!(Float64Array),
        DataType::Float32 => render!(Float32Array),
        DataType::Boolean => render!(BooleanArray),
        _ => None,
    };

    value.map(Some).ok_or_else(|| StoreError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: col.data_type().to_string(),
    })
}

/// Extract a named column as strings across all batches, in row order.
pub fn string_column(
    batches: &[RecordBatch],
    name: &str,
) -> Result<Vec<Option<String>>, StoreError> {
    let mut out = Vec::with_capacity(batches.iter().map(|b| b.num_rows()).sum());
    for batch in batches {
        let col = batch
            .column_by_name(name)
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))?;
        for row in 0..batch.num_rows() {
            out.push(cell_to_string(name, col.as_ref(), row)?);
        }
    }
    Ok(out)
}
