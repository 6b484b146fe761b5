//! Plain-text evaluation report.

use std::fmt::Write;

use crate::scorer::Evaluation;

/// Render the report written to the evaluation results file.
pub fn render_report(eval: &Evaluation) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, eval);
    out
}

fn write_report(out: &mut String, eval: &Evaluation) -> std::fmt::Result {
    writeln!(out, "SDOH Annotation Evaluation Report")?;
    writeln!(out, "================================")?;
    writeln!(out)?;
    writeln!(out, "SDOH Evaluation Results:")?;
    for score in &eval.fields {
        writeln!(
            out,
            "{} - Accuracy: {:.4}, F1-score: {:.4}",
            score.field, score.accuracy, score.f1
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Overall Results:")?;
    writeln!(out, "Overall Accuracy: {:.4}", eval.overall_accuracy)?;
    writeln!(out, "Overall F1-score: {:.4}", eval.overall_f1)?;
    writeln!(out)?;
    writeln!(out, "Join Summary:")?;
    writeln!(out, "Matched rows: {}", eval.matched_rows)?;
    writeln!(out, "Unmatched ground-truth rows: {}", eval.truth_only_rows)?;
    writeln!(out, "Unmatched predicted rows: {}", eval.prediction_only_rows)?;
    Ok(())
}
