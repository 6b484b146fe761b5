//! Annotation layer: prompts an LLM provider for the eight SBDH codes of a
//! clinical note, retrying with exponential backoff and degrading to a
//! fallback row when every attempt fails.

pub mod annotator;
pub mod batch;
pub mod config;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod retry;

pub use annotator::{Annotation, AnnotationOutcome, Annotator, AnnotatorConfig, AttemptError};
pub use batch::{BatchOutput, BatchRunner};
pub use config::{ConfigError, ProviderConfig};
pub use openai::OpenAiProvider;
pub use provider::{Completion, CompletionProvider, CompletionRequest, ProviderError};
pub use response::{CodeValidation, ValidationError, parse_response};
pub use retry::{BackoffPolicy, RetryState};
