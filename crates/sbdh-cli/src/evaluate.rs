//! Evaluation command: score an annotation table against ground truth.

use std::path::Path;

use anyhow::Context;
use sbdh_eval::{FieldTable, evaluate, render_report};

use crate::EvaluateArgs;

pub fn run(args: &EvaluateArgs) -> anyhow::Result<()> {
    let truth = load(&args.truth, &args.id_column)?;
    let predicted = load(&args.predicted, &args.id_column)?;
    eprintln!(
        "  Loaded {} ground-truth rows and {} predicted rows",
        truth.len(),
        predicted.len()
    );

    let evaluation = evaluate(&truth, &predicted).context("scoring annotations")?;
    let report = render_report(&evaluation);
    std::fs::write(&args.output, &report)
        .with_context(|| format!("writing {}", args.output.display()))?;

    print!("{report}");
    println!("Results saved to {}", args.output.display());
    Ok(())
}

fn load(path: &Path, id_column: &str) -> anyhow::Result<FieldTable> {
    let batches =
        sbdh_store::read_table(path, None).with_context(|| format!("reading {}", path.display()))?;
    FieldTable::from_batches(&batches, id_column)
        .with_context(|| format!("extracting fields from {}", path.display()))
}
