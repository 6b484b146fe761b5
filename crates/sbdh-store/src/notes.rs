//! Clinical note extraction from input table batches.

use std::collections::HashSet;

use arrow::record_batch::RecordBatch;
use sbdh_core::ClinicalNote;
use tracing::warn;

use crate::StoreError;
use crate::columns::string_column;

/// Row identifier column in MIMIC-style note exports.
pub const DEFAULT_ID_COLUMN: &str = "ROW_ID";
/// Free-text column in MIMIC-style note exports.
pub const DEFAULT_TEXT_COLUMN: &str = "TEXT";

/// Build one [`ClinicalNote`] per row, in table order.
///
/// A null identifier is an error. A null text becomes an empty note so the
/// row still produces an annotation.
pub fn extract_notes(
    batches: &[RecordBatch],
    id_column: &str,
    text_column: &str,
) -> Result<Vec<ClinicalNote>, StoreError> {
    let ids = string_column(batches, id_column)?;
    let texts = string_column(batches, text_column)?;

    let mut seen = HashSet::with_capacity(ids.len());
    let mut notes = Vec::with_capacity(ids.len());
    for (row, (id, text)) in ids.into_iter().zip(texts).enumerate() {
        let row_id = id.ok_or_else(|| StoreError::NullValue {
            column: id_column.to_string(),
            row,
        })?;
        if !seen.insert(row_id.clone()) {
            warn!(row, row_id = %row_id, "duplicate row identifier in input table");
        }
        let text = text.unwrap_or_else(|| {
            warn!(row, row_id = %row_id, "null note text, annotating empty string");
            String::new()
        });
        notes.push(ClinicalNote { row_id, text });
    }
    Ok(notes)
}
