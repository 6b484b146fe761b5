use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("unsupported table format: {0} (expected .csv or .parquet)")]
    UnsupportedFormat(std::path::PathBuf),

    #[error("missing '{0}' column")]
    MissingColumn(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("null value in '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("{left} and {right} differ in length ({left_len} vs {right_len})")]
    LengthMismatch {
        left: &'static str,
        right: &'static str,
        left_len: usize,
        right_len: usize,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
