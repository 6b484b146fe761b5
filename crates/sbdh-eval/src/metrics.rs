//! Classification metrics over categorical code labels.
//!
//! Semantics follow the usual multi-class definitions: the label set is the
//! union of labels seen in either vector, and undefined ratios count as zero.

use std::collections::{BTreeMap, BTreeSet};

/// Fraction of positions where prediction equals truth. `0.0` for empty input.
pub fn accuracy<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }
    let hits = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t.as_ref() == p.as_ref())
        .count();
    hits as f64 / n as f64
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    true_positive: usize,
    predicted: usize,
    support: usize,
}

/// Per-class F1 averaged with weights equal to each class's true support.
///
/// Classes seen only in predictions have zero support and carry no weight.
pub fn weighted_f1<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }

    let labels: BTreeSet<&str> = y_true
        .iter()
        .chain(y_pred)
        .map(AsRef::as_ref)
        .collect();
    let mut counts: BTreeMap<&str, Counts> =
        labels.into_iter().map(|l| (l, Counts::default())).collect();

    for (t, p) in y_true.iter().zip(y_pred) {
        let (t, p) = (t.as_ref(), p.as_ref());
        if let Some(c) = counts.get_mut(t) {
            c.support += 1;
            if t == p {
                c.true_positive += 1;
            }
        }
        if let Some(c) = counts.get_mut(p) {
            c.predicted += 1;
        }
    }

    let weighted: f64 = counts.values().map(|c| f1(c) * c.support as f64).sum();
    weighted / n as f64
}

fn f1(c: &Counts) -> f64 {
    let precision = ratio(c.true_positive, c.predicted);
    let recall = ratio(c.true_positive, c.support);
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
