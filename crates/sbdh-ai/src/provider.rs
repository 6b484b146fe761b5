//! Text-generation provider abstraction.
//!
//! The annotator only needs "system instruction + user text in, text + token
//! usage out". Production uses [`OpenAiProvider`](crate::OpenAiProvider);
//! tests substitute scripted fakes.

use async_trait::async_trait;
use sbdh_core::UsageRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no message content")]
    EmptyResponse,
    #[error("{0}")]
    Other(String),
}

/// One generation request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
}

/// Generated text plus token accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: UsageRecord,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError>;
}

#[async_trait]
impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        (**self).complete(request).await
    }
}
