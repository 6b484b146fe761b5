//! Table I/O: CSV/Parquet input tables, note extraction, annotation and usage CSV output.

mod columns;
mod error;
mod notes;
mod table;
mod writer;

pub use columns::{cell_to_string, string_column};
pub use error::StoreError;
pub use notes::{DEFAULT_ID_COLUMN, DEFAULT_TEXT_COLUMN, extract_notes};
pub use table::{TableFormat, read_csv, read_parquet, read_table, total_rows};
pub use writer::{write_annotations, write_usage};
