//! Scoring of predicted annotations against a ground-truth table.

pub mod error;
pub mod metrics;
pub mod report;
pub mod scorer;
pub mod table;

pub use error::EvalError;
pub use metrics::{accuracy, weighted_f1};
pub use report::render_report;
pub use scorer::{Evaluation, FieldScore, evaluate};
pub use table::FieldTable;
