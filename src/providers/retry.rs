//! Retry configuration, delay calculation, and the retrying oracle decorator.
//!
//! The decision engine never retries a failed chunk itself; retry belongs to
//! the oracle client. [`RetryingClassifyProvider`] wraps any
//! [`ClassifyProvider`] and retries transient errors with exponential
//! backoff before the engine sees the failure.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

use crate::telemetry;

use super::traits::ClassifyProvider;
use crate::types::ClassifyResult;
use crate::{DocsortError, Result};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff with optional jitter:
///
/// ```rust
/// # use docsort::providers::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(true);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    #[serde(rename = "initial_delay_ms", deserialize_with = "millis")]
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    #[serde(rename = "max_delay_ms", deserialize_with = "millis")]
    pub max_delay: Duration,
    /// Whether to add random jitter to delays. Default: true.
    pub jitter: bool,
}

fn millis<'de, D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter.
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Delay for a given attempt number (0-indexed), without jitter:
    /// `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Delay actually slept before retry `attempt`.
    ///
    /// A `retry_after` hint from a `RateLimited` error takes precedence.
    /// Otherwise the backoff delay is used, scaled into `[50%, 100%]` when
    /// jitter is enabled.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint;
        }
        let delay = self.delay_for_attempt(attempt);
        if !self.jitter {
            return delay;
        }
        delay.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
    }
}

/// Execute an async operation with retry logic.
///
/// Retries on transient errors (as classified by
/// [`DocsortError::is_transient()`]) up to `config.max_attempts`. Permanent
/// errors are returned immediately.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    provider_name: &str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..config.max_attempts.max(1) {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                if attempt + 1 < config.max_attempts {
                    metrics::counter!(telemetry::RETRIES_TOTAL,
                        "provider" => provider_name.to_owned(),
                    )
                    .increment(1);
                    let delay = config.effective_delay(attempt, e.retry_after());
                    warn!(
                        provider = provider_name,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or(DocsortError::EmptyResponse))
}

/// Decorator that wraps a [`ClassifyProvider`] with retry logic.
///
/// Transient errors are retried with exponential backoff, respecting
/// `retry_after` hints; permanent errors are returned immediately.
pub struct RetryingClassifyProvider {
    inner: Arc<dyn ClassifyProvider>,
    config: RetryConfig,
}

impl RetryingClassifyProvider {
    /// Wrap a classify provider with retry logic.
    pub fn new(inner: Arc<dyn ClassifyProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl ClassifyProvider for RetryingClassifyProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        with_retry(&self.config, self.inner.name(), || {
            self.inner.classify(text, labels)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig::new()
            .initial_delay(Duration::from_millis(100))
            .max_delay(Duration::from_millis(350));
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(350));
        assert_eq!(config.delay_for_attempt(30), Duration::from_millis(350));
    }

    #[test]
    fn retry_after_hint_wins() {
        let config = RetryConfig::new();
        assert_eq!(
            config.effective_delay(0, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
    }

    #[test]
    fn jitter_stays_within_half_to_full_delay() {
        let config = RetryConfig::new().initial_delay(Duration::from_millis(1000));
        for _ in 0..20 {
            let delay = config.effective_delay(0, None);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn jittered_delays_vary_between_calls() {
        let config = RetryConfig::new().initial_delay(Duration::from_millis(1000));
        let first = config.effective_delay(0, None);
        let varied = (0..50).any(|_| config.effective_delay(0, None) != first);
        assert!(varied, "every delay was {first:?}");
    }

    #[test]
    fn no_jitter_is_exact() {
        let config = RetryConfig::new().jitter(false);
        assert_eq!(config.effective_delay(1, None), Duration::from_secs(1));
    }
}
