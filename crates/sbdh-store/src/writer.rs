//! CSV output for annotation and usage tables.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use sbdh_core::schema::{annotation_schema, usage_schema};
use sbdh_core::{AnnotationRecord, SbdhField, UsageRecord};
use tracing::info;

use crate::StoreError;

/// Write `row_id` + the eight field columns, one line per record, in order.
pub fn write_annotations(path: &Path, records: &[AnnotationRecord]) -> Result<(), StoreError> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(SbdhField::ALL.len() + 1);
    columns.push(Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.row_id.as_str()),
    )));
    for field in SbdhField::ALL {
        columns.push(Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.value(field)),
        )));
    }

    let batch = RecordBatch::try_new(Arc::new(annotation_schema()), columns)?;
    write_csv(path, &batch)?;
    info!(path = %path.display(), rows = records.len(), "wrote annotations");
    Ok(())
}

/// Write the three token counters per call.
///
/// With `row_ids`, a leading `row_id` column keys each line; it must be
/// aligned with `usage`.
pub fn write_usage(
    path: &Path,
    usage: &[UsageRecord],
    row_ids: Option<&[String]>,
) -> Result<(), StoreError> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(4);
    if let Some(ids) = row_ids {
        if ids.len() != usage.len() {
            return Err(StoreError::LengthMismatch {
                left: "row ids",
                right: "usage records",
                left_len: ids.len(),
                right_len: usage.len(),
            });
        }
        columns.push(Arc::new(StringArray::from_iter_values(ids)));
    }
    columns.push(Arc::new(UInt64Array::from_iter_values(
        usage.iter().map(|u| u.prompt_tokens),
    )));
    columns.push(Arc::new(UInt64Array::from_iter_values(
        usage.iter().map(|u| u.completion_tokens),
    )));
    columns.push(Arc::new(UInt64Array::from_iter_values(
        usage.iter().map(|u| u.total_tokens),
    )));

    let batch = RecordBatch::try_new(Arc::new(usage_schema(row_ids.is_some())), columns)?;
    write_csv(path, &batch)?;
    info!(path = %path.display(), rows = usage.len(), "wrote token usage");
    Ok(())
}

fn write_csv(path: &Path, batch: &RecordBatch) -> Result<(), StoreError> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbdh_core::fallback_values;
    use tempfile::TempDir;

    fn record(id: &str, values: [&str; 8]) -> AnnotationRecord {
        AnnotationRecord::new(id, values.map(String::from))
    }

    #[test]
    fn annotation_csv_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotated.csv");
        let records = vec![
            record("101", ["0", "1", "0", "2", "0", "1", "3", "3"]),
            AnnotationRecord::new("102", fallback_values()),
        ];

        write_annotations(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "row_id,sdoh_community_present,sdoh_community_absent,sdoh_education,\
             sdoh_economics,sdoh_environment,behavior_alcohol,behavior_tobacco,behavior_drug"
        );
        assert_eq!(lines[1], "101,0,1,0,2,0,1,3,3");
        assert_eq!(lines[2], "102,0,0,0,0,0,0,0,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn usage_csv_positional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage.csv");
        let usage = vec![
            UsageRecord {
                prompt_tokens: 612,
                completion_tokens: 15,
                total_tokens: 627,
            },
            UsageRecord::default(),
        ];

        write_usage(&path, &usage, None).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["prompt_tokens,completion_tokens,total_tokens", "612,15,627", "0,0,0"]
        );
    }

    #[test]
    fn usage_csv_keyed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage.csv");
        let ids = vec!["9".to_string()];
        let usage = vec![UsageRecord {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        }];

        write_usage(&path, &usage, Some(&ids)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("row_id,prompt_tokens,completion_tokens,total_tokens\n9,1,2,3"));
    }

    #[test]
    fn usage_key_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage.csv");
        let ids = vec!["1".to_string(), "2".to_string()];
        let err = write_usage(&path, &[UsageRecord::default()], Some(&ids)).unwrap_err();
        assert!(matches!(err, StoreError::LengthMismatch { .. }));
    }

    #[test]
    fn roundtrip_through_reader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotated.csv");
        write_annotations(&path, &[record("5", ["1", "0", "1", "1", "2", "4", "2", "0"])]).unwrap();

        let batches = crate::read_table(&path, None).unwrap();
        let ids = crate::string_column(&batches, "row_id").unwrap();
        let alcohol = crate::string_column(&batches, "behavior_alcohol").unwrap();
        assert_eq!(ids, vec![Some("5".to_string())]);
        assert_eq!(alcohol, vec![Some("4".to_string())]);
    }
}
