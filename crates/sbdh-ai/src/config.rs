//! Provider configuration, built once at startup and passed explicitly.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found: an API key is required before any note is annotated")]
    MissingCredential,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Connection settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    /// Per-request timeout; `None` leaves it to the HTTP client.
    pub request_timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Build a config with default endpoint and model.
    ///
    /// A missing or blank key is [`ConfigError::MissingCredential`]: retrying
    /// cannot fix it, so callers should abort before reading any input.
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential)?;
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: None,
        })
    }

    /// Read the credential from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
