//! Annotation pipeline: read notes, annotate each with the provider, write
//! the annotation and usage tables.

use std::time::{Duration, Instant};

use anyhow::Context;
use sbdh_ai::{
    Annotator, AnnotatorConfig, BatchRunner, CodeValidation, OpenAiProvider, ProviderConfig,
};
use tracing::info;

use crate::AnnotateArgs;

pub async fn run(args: &AnnotateArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    // Credential first: a missing key must stop the run before any input is read.
    let provider_config = ProviderConfig::new(args.api_key.clone())
        .context("loading provider configuration")?
        .with_base_url(&args.base_url)
        .with_model(&args.model)
        .with_request_timeout(args.request_timeout_secs.map(Duration::from_secs));
    let validation = if args.strict_codes {
        CodeValidation::Strict
    } else {
        CodeValidation::Lenient
    };
    let annotator_config = AnnotatorConfig::new(args.max_attempts, args.backoff_factor)
        .context("invalid retry settings")?
        .with_validation(validation);
    let provider = OpenAiProvider::new(&provider_config).context("building HTTP client")?;
    info!(
        model = provider.model(),
        base_url = %provider_config.base_url,
        max_attempts = annotator_config.max_attempts,
        "provider ready"
    );

    let batches = sbdh_store::read_table(&args.input, args.row_limit())
        .with_context(|| format!("reading {}", args.input.display()))?;
    let notes = sbdh_store::extract_notes(&batches, &args.id_column, &args.text_column)
        .with_context(|| format!("extracting notes from {}", args.input.display()))?;
    eprintln!("  Read {} notes from {}", notes.len(), args.input.display());

    let runner = BatchRunner::new(Annotator::new(provider, annotator_config));
    let output = runner
        .run_with_progress(&notes, |done, total| {
            eprint!(
                "\r  Annotated {done}/{total} ({:.1}%)",
                done as f64 / total as f64 * 100.0
            );
        })
        .await;
    if !notes.is_empty() {
        eprintln!();
    }

    sbdh_store::write_annotations(&args.output, &output.annotations)
        .with_context(|| format!("writing {}", args.output.display()))?;
    let row_ids = args.usage_row_id.then(|| output.row_ids());
    sbdh_store::write_usage(&args.usage_output, &output.usage, row_ids.as_deref())
        .with_context(|| format!("writing {}", args.usage_output.display()))?;

    let usage = output.total_usage();
    info!(
        rows = output.len(),
        fallbacks = output.fallbacks,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "annotation run complete"
    );
    println!("Annotations saved to {}", args.output.display());
    println!("Token usage saved to {}", args.usage_output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: AnnotateArgs,
    }

    #[tokio::test]
    async fn missing_credential_fails_before_reading_input() {
        let mut args = Wrapper::parse_from(["annotate", "/nonexistent/notes.csv"]).args;
        args.api_key = None;

        let err = run(&args).await.unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("OPENAI_API_KEY"), "{message}");
        assert!(!message.contains("notes.csv"), "{message}");
    }
}
