//! Bounded retry: backoff schedule and attempt state machine.
//!
//! Kept free of I/O so the attempt ceiling and the delay schedule can be
//! checked without a provider.

use std::time::Duration;

use rand::Rng;

use crate::config::ConfigError;

const MAX_JITTER_SECS: f64 = 0.999_999_999;

/// Exponential backoff with up to one second of uniform jitter.
///
/// Delay after failed attempt `i` (0-based) is `factor * 2^i + jitter`,
/// `jitter` in `[0, 1)` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    factor: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}

impl BackoffPolicy {
    pub const DEFAULT_FACTOR: f64 = 1.5;

    pub fn new(factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "backoff factor must be a non-negative number, got {factor}"
            )));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Deterministic part of the delay, in seconds.
    pub fn base_secs(&self, attempt_index: u32) -> f64 {
        self.factor * 2f64.powi(attempt_index.min(i32::MAX as u32) as i32)
    }

    /// Delay for `attempt_index` with an explicit jitter sample (clamped to `[0, 1)`).
    pub fn delay(&self, attempt_index: u32, jitter: f64) -> Duration {
        // Duration conversion rounds to the nearest nanosecond.
        let jitter = if jitter.is_finite() {
            jitter.clamp(0.0, MAX_JITTER_SECS)
        } else {
            0.0
        };
        let secs = self.base_secs(attempt_index) + jitter;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Delay for `attempt_index` with jitter drawn from `rng`.
    pub fn sample<R: Rng>(&self, attempt_index: u32, rng: &mut R) -> Duration {
        self.delay(attempt_index, rng.random::<f64>())
    }
}

/// Where an annotation call is in its retry sequence.
///
/// `Succeeded` and `Fallback` are terminal; [`advance`](Self::advance) leaves
/// them unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState<T> {
    /// About to run the attempt with this 0-based index.
    Attempting(u32),
    Succeeded(T),
    /// Every attempt failed.
    Fallback,
}

impl<T> RetryState<T> {
    pub fn start() -> Self {
        Self::Attempting(0)
    }

    /// Transition on the outcome of the current attempt.
    ///
    /// At least one attempt always runs, even with `max_attempts == 0`.
    pub fn advance<E>(self, outcome: Result<T, E>, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(n) => match outcome {
                Ok(value) => Self::Succeeded(value),
                Err(_) if n.saturating_add(1) < max_attempts => Self::Attempting(n + 1),
                Err(_) => Self::Fallback,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}
