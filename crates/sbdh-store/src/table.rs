//! Reading whole tables into Arrow RecordBatches.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{debug, info};

use crate::StoreError;

/// On-disk table formats accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") | Some("pq") => Ok(Self::Parquet),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read a CSV or Parquet table, keeping at most `limit` rows.
pub fn read_table(path: &Path, limit: Option<usize>) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let batches = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path)?,
        TableFormat::Parquet => read_parquet(path)?,
    };
    let rows = total_rows(&batches);
    let batches = match limit {
        Some(limit) => truncate(batches, limit),
        None => batches,
    };
    info!(
        path = %path.display(),
        rows_read = rows,
        rows_kept = total_rows(&batches),
        "loaded table"
    );
    Ok(batches)
}

/// Read a CSV file with a header row, inferring column types from every record.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);
    let (schema, records) = format.infer_schema(&mut file, None)?;
    debug!(records, columns = schema.fields().len(), "inferred CSV schema");
    file.rewind()?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .build(file)?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

pub fn total_rows(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}

/// Keep the first `limit` rows across batches (zero-copy slices).
fn truncate(batches: Vec<RecordBatch>, limit: usize) -> Vec<RecordBatch> {
    let mut remaining = limit;
    let mut out = Vec::new();
    for batch in batches {
        if remaining == 0 {
            break;
        }
        let take = batch.num_rows().min(remaining);
        out.push(if take == batch.num_rows() {
            batch
        } else {
            batch.slice(0, take)
        });
        remaining -= take;
    }
    out
}
