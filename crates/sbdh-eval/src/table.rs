//! Ground-truth and predicted tables reduced to normalised field values.

use arrow::record_batch::RecordBatch;
use sbdh_core::{FieldValues, SbdhField, normalize_code};
use sbdh_store::{StoreError, string_column};

/// One row per table row: normalised id plus the eight normalised field values.
///
/// Null field cells become the empty string, so they only ever match other nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    pub rows: Vec<(String, FieldValues)>,
}

impl FieldTable {
    /// Build from Arrow batches carrying `id_column` and every field column.
    ///
    /// Extra columns (e.g. the note text in a ground-truth export) are ignored.
    pub fn from_batches(batches: &[RecordBatch], id_column: &str) -> Result<Self, StoreError> {
        let ids = string_column(batches, id_column)?;
        let mut columns = Vec::with_capacity(SbdhField::ALL.len());
        for field in SbdhField::ALL {
            columns.push(string_column(batches, field.name())?);
        }

        let mut rows = Vec::with_capacity(ids.len());
        for (row, id) in ids.into_iter().enumerate() {
            let id = id.ok_or_else(|| StoreError::NullValue {
                column: id_column.to_string(),
                row,
            })?;
            let values: FieldValues = std::array::from_fn(|i| {
                columns[i][row]
                    .as_deref()
                    .map(normalize_code)
                    .unwrap_or_default()
            });
            rows.push((normalize_code(&id), values));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
