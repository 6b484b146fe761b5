use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sbdh_ai::BackoffPolicy;
use sbdh_ai::config::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use sbdh_core::schema::ROW_ID;
use sbdh_store::{DEFAULT_ID_COLUMN, DEFAULT_TEXT_COLUMN};
use tracing_subscriber::EnvFilter;

mod annotate;
mod evaluate;

const DEFAULT_ANNOTATIONS: &str = "gpt4o-mini_annotated_results.csv";
const DEFAULT_USAGE: &str = "token_usage.csv";
const DEFAULT_REPORT: &str = "evaluation_results.txt";

#[derive(Parser)]
#[command(name = "sbdh", version)]
#[command(about = "Annotate clinical notes for social and behavioral determinants of health")]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[arg(long, short, global = true, help = "Show debug output (overrides RUST_LOG)")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Annotate notes from a CSV or Parquet table with an LLM")]
    Annotate(AnnotateArgs),
    #[command(about = "Score annotations against a ground-truth table")]
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    #[arg(help = "Input table (.csv or .parquet)")]
    pub input: PathBuf,

    #[arg(long, short, default_value = DEFAULT_ANNOTATIONS, help = "Annotation CSV to write")]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_USAGE, help = "Token usage CSV to write")]
    pub usage_output: PathBuf,

    #[arg(long, help = "Prefix the usage table with a row_id column")]
    pub usage_row_id: bool,

    #[arg(long, default_value_t = 100, help = "Annotate only the first N rows")]
    pub limit: usize,

    #[arg(long, conflicts_with = "limit", help = "Annotate every row")]
    pub all: bool,

    #[arg(long, default_value = DEFAULT_ID_COLUMN, help = "Row identifier column")]
    pub id_column: String,

    #[arg(long, default_value = DEFAULT_TEXT_COLUMN, help = "Note text column")]
    pub text_column: String,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true, help = "Provider API key")]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "SBDH_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value_t = 3, help = "Attempts per note, including the first")]
    pub max_attempts: u32,

    #[arg(long, default_value_t = BackoffPolicy::DEFAULT_FACTOR, help = "Backoff base in seconds")]
    pub backoff_factor: f64,

    #[arg(long, help = "Retry replies whose codes fall outside a field's code set")]
    pub strict_codes: bool,

    #[arg(long, help = "Per-request HTTP timeout in seconds")]
    pub request_timeout_secs: Option<u64>,
}

impl AnnotateArgs {
    pub fn row_limit(&self) -> Option<usize> {
        (!self.all).then_some(self.limit)
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[arg(long, help = "Ground-truth table with row_id and the eight field columns")]
    pub truth: PathBuf,

    #[arg(long, default_value = DEFAULT_ANNOTATIONS, help = "Annotation table to score")]
    pub predicted: PathBuf,

    #[arg(long, short, default_value = DEFAULT_REPORT, help = "Report file to write")]
    pub output: PathBuf,

    #[arg(long, default_value = ROW_ID, help = "Join column present in both tables")]
    pub id_column: String,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("sbdh v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Annotate(args) => annotate::run(&args).await,
        Commands::Evaluate(args) => evaluate::run(&args),
    }
}
