use sbdh_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(
        "no row ids in common ({truth_rows} ground-truth rows, {predicted_rows} predicted rows)"
    )]
    NoOverlap {
        truth_rows: usize,
        predicted_rows: usize,
    },
}
