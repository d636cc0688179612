//! Opt-in cache of oracle answers.
//!
//! Zero-shot classification is deterministic for a fixed model: the same
//! chunk text scored against the same labels yields the same answer.
//! [`ResponseCache`] keeps recent answers so repeated chunks (shared
//! boilerplate, re-uploaded documents) skip the oracle round-trip.
//!
//! The cache sits in
//! [`CachingClassifyProvider`](crate::providers::CachingClassifyProvider),
//! wrapping the oracle. A hit bypasses the inner provider entirely,
//! including any retry decorator beneath it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;

use crate::telemetry;
use crate::types::ClassifyResult;

/// Configuration for the response cache.
///
/// ```rust
/// # use docsort::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(10_000)
///     .ttl(Duration::from_secs(3600));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 1 hour.
    #[serde(rename = "ttl_secs", deserialize_with = "secs")]
    pub ttl: Duration,
}

fn secs<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory LRU + TTL cache of oracle answers, keyed on a content hash of
/// (provider, labels, text).
pub struct ResponseCache {
    cache: Cache<u64, ClassifyResult>,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up a cached answer. Emits cache hit/miss metrics.
    pub async fn get(&self, provider: &str, text: &str, labels: &[&str]) -> Option<ClassifyResult> {
        let key = cache_key(provider, text, labels);
        match self.cache.get(&key).await {
            Some(answer) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(answer)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    pub async fn insert(&self, provider: &str, text: &str, labels: &[&str], answer: ClassifyResult) {
        let key = cache_key(provider, text, labels);
        self.cache.insert(key, answer).await;
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

/// SipHash of the inputs; stable within one process, which is all an
/// in-memory cache needs.
fn cache_key(provider: &str, text: &str, labels: &[&str]) -> u64 {
    let mut hasher = DefaultHasher::new();
    provider.hash(&mut hasher);
    labels.hash(&mut hasher);
    text.hash(&mut hasher);
    hasher.finish()
}
