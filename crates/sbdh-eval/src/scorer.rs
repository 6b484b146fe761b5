//! Join ground truth with predictions and score every field.

use std::collections::{HashMap, HashSet};

use sbdh_core::SbdhField;
use tracing::{info, warn};

use crate::error::EvalError;
use crate::metrics::{accuracy, weighted_f1};
use crate::table::FieldTable;

/// Scores for one annotation field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScore {
    pub field: SbdhField,
    pub accuracy: f64,
    pub f1: f64,
}

/// Per-field scores, their means, and how the two tables lined up.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// One entry per field, in [`SbdhField::ALL`] order.
    pub fields: Vec<FieldScore>,
    pub overall_accuracy: f64,
    pub overall_f1: f64,
    /// Joined (truth, prediction) pairs.
    pub matched_rows: usize,
    /// Ground-truth rows whose id never appears in the predictions.
    pub truth_only_rows: usize,
    /// Predicted rows whose id never appears in the ground truth.
    pub prediction_only_rows: usize,
}

impl Evaluation {
    pub fn field(&self, field: SbdhField) -> Option<&FieldScore> {
        self.fields.iter().find(|s| s.field == field)
    }
}

/// Inner-join `truth` and `predicted` on row id and score each field.
///
/// Every truth/prediction pair sharing an id becomes one joined row, ordered
/// by the ground-truth table; duplicate ids therefore multiply.
pub fn evaluate(truth: &FieldTable, predicted: &FieldTable) -> Result<Evaluation, EvalError> {
    let mut by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, (id, _)) in predicted.rows.iter().enumerate() {
        by_id.entry(id.as_str()).or_default().push(i);
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut truth_only_rows = 0;
    for (t, (id, _)) in truth.rows.iter().enumerate() {
        match by_id.get(id.as_str()) {
            Some(matches) => pairs.extend(matches.iter().map(|&p| (t, p))),
            None => truth_only_rows += 1,
        }
    }
    let truth_ids: HashSet<&str> = truth.rows.iter().map(|(id, _)| id.as_str()).collect();
    let prediction_only_rows = predicted
        .rows
        .iter()
        .filter(|(id, _)| !truth_ids.contains(id.as_str()))
        .count();

    if pairs.is_empty() {
        return Err(EvalError::NoOverlap {
            truth_rows: truth.len(),
            predicted_rows: predicted.len(),
        });
    }
    if truth_only_rows > 0 || prediction_only_rows > 0 {
        warn!(
            truth_only_rows,
            prediction_only_rows, "rows without a counterpart are excluded from scoring"
        );
    }

    let fields: Vec<FieldScore> = SbdhField::ALL
        .iter()
        .map(|&field| {
            let i = field.index();
            let (y_true, y_pred): (Vec<&str>, Vec<&str>) = pairs
                .iter()
                .map(|&(t, p)| {
                    (
                        truth.rows[t].1[i].as_str(),
                        predicted.rows[p].1[i].as_str(),
                    )
                })
                .unzip();
            FieldScore {
                field,
                accuracy: accuracy(&y_true, &y_pred),
                f1: weighted_f1(&y_true, &y_pred),
            }
        })
        .collect();

    let count = fields.len() as f64;
    let overall_accuracy = fields.iter().map(|s| s.accuracy).sum::<f64>() / count;
    let overall_f1 = fields.iter().map(|s| s.f1).sum::<f64>() / count;
    info!(
        matched_rows = pairs.len(),
        overall_accuracy, overall_f1, "evaluation complete"
    );

    Ok(Evaluation {
        fields,
        overall_accuracy,
        overall_f1,
        matched_rows: pairs.len(),
        truth_only_rows,
        prediction_only_rows,
    })
}
