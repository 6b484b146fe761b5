//! Single-note annotation with bounded retry and a safe fallback.

use sbdh_core::{FieldValues, UsageRecord, fallback_values};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ConfigError;
use crate::prompt::SYSTEM_PROMPT;
use crate::provider::{CompletionProvider, CompletionRequest, ProviderError};
use crate::response::{CodeValidation, ValidationError, parse_response};
use crate::retry::{BackoffPolicy, RetryState};

/// Why one attempt did not produce a usable row. Both kinds are retried.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatorConfig {
    /// Attempts per note, including the first.
    pub max_attempts: u32,
    pub backoff: BackoffPolicy,
    pub validation: CodeValidation,
    pub temperature: f32,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffPolicy::default(),
            validation: CodeValidation::Lenient,
            temperature: 0.0,
        }
    }
}

impl AnnotatorConfig {
    pub fn new(max_attempts: u32, backoff_factor: f64) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::Invalid("max attempts must be at least 1".into()));
        }
        Ok(Self {
            max_attempts,
            backoff: BackoffPolicy::new(backoff_factor)?,
            ..Self::default()
        })
    }

    pub fn with_validation(mut self, validation: CodeValidation) -> Self {
        self.validation = validation;
        self
    }
}

/// How an annotation was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationOutcome {
    Succeeded { attempts: u32 },
    Fallback { attempts: u32 },
}

impl AnnotationOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts } | Self::Fallback { attempts } => *attempts,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Result of annotating one note. Always carries eight values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub values: FieldValues,
    pub usage: UsageRecord,
    pub outcome: AnnotationOutcome,
}

/// Prompts a provider for the eight SBDH codes of a note.
pub struct Annotator<P> {
    provider: P,
    config: AnnotatorConfig,
}

impl<P: CompletionProvider> Annotator<P> {
    pub fn new(provider: P, config: AnnotatorConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Annotate one note. Never fails: exhausted retries yield the all-zero
    /// fallback row with zero usage.
    pub async fn annotate(&self, text: &str) -> Annotation {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT,
            user: text,
            temperature: self.config.temperature,
        };
        let max_attempts = self.config.max_attempts;
        let mut state = RetryState::start();

        loop {
            state = match state {
                RetryState::Attempting(n) => {
                    let outcome = self.attempt(&request, n).await;
                    if let Err(e) = &outcome {
                        warn!(
                            attempt = n + 1,
                            max_attempts,
                            error = %e,
                            "annotation attempt failed"
                        );
                    }
                    let next = RetryState::Attempting(n).advance(outcome, max_attempts);
                    if let RetryState::Attempting(_) = next {
                        let delay = self.config.backoff.sample(n, &mut rand::rng());
                        info!(
                            attempt = n + 1,
                            "retrying after {:.2} seconds",
                            delay.as_secs_f64()
                        );
                        tokio::time::sleep(delay).await;
                    }
                    next
                }
                RetryState::Succeeded((values, usage, attempts)) => {
                    debug!(attempts, total_tokens = usage.total_tokens, "note annotated");
                    return Annotation {
                        values,
                        usage,
                        outcome: AnnotationOutcome::Succeeded { attempts },
                    };
                }
                RetryState::Fallback => {
                    let attempts = max_attempts.max(1);
                    warn!(attempts, "all attempts failed, using fallback row");
                    return Annotation {
                        values: fallback_values(),
                        usage: UsageRecord::default(),
                        outcome: AnnotationOutcome::Fallback { attempts },
                    };
                }
            };
        }
    }

    async fn attempt(
        &self,
        request: &CompletionRequest<'_>,
        attempt_index: u32,
    ) -> Result<(FieldValues, UsageRecord, u32), AttemptError> {
        let completion = self.provider.complete(request).await?;
        let values = parse_response(&completion.text, self.config.validation)?;
        Ok((values, completion.usage, attempt_index + 1))
    }
}
