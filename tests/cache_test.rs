use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use docsort::cache::CacheConfig;
use docsort::providers::{CachingClassifyProvider, ClassifyProvider};
use docsort::{CategorySet, ClassifyResult, DecisionEngine, DocsortError, EngineConfig, Result};

/// Counts calls; fails on text containing "fail".
#[derive(Default)]
struct CountingOracle {
    calls: AtomicU32,
}

impl CountingOracle {
    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifyProvider for CountingOracle {
    fn name(&self) -> &str {
        "counting"
    }

    async fn classify(&self, text: &str, _labels: &[&str]) -> Result<ClassifyResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("fail") {
            return Err(DocsortError::Http("unreachable".to_string()));
        }
        Ok(ClassifyResult::from_pairs([("A", 0.9), ("Other", 0.1)]))
    }
}

#[tokio::test]
async fn repeated_requests_hit_the_cache() {
    let oracle = Arc::new(CountingOracle::default());
    let cached = CachingClassifyProvider::new(oracle.clone(), &CacheConfig::default());

    let first = cached.classify("hello", &["A", "Other"]).await.unwrap();
    let second = cached.classify("hello", &["A", "Other"]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(oracle.calls(), 1);
    assert_eq!(cached.name(), "counting");
}

#[tokio::test]
async fn different_labels_miss_the_cache() {
    let oracle = Arc::new(CountingOracle::default());
    let cached = CachingClassifyProvider::new(oracle.clone(), &CacheConfig::default());

    cached.classify("hello", &["A", "Other"]).await.unwrap();
    cached.classify("hello", &["Other", "A"]).await.unwrap();

    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let oracle = Arc::new(CountingOracle::default());
    let cached = CachingClassifyProvider::new(oracle.clone(), &CacheConfig::default());

    assert!(cached.classify("fail", &["A"]).await.is_err());
    assert!(cached.classify("fail", &["A"]).await.is_err());

    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn repeated_boilerplate_chunks_reach_the_oracle_once() {
    let oracle = Arc::new(CountingOracle::default());
    let cached = Arc::new(CachingClassifyProvider::new(
        oracle.clone(),
        &CacheConfig::new().max_entries(100),
    ));
    let categories = CategorySet::new(["A", "Other"], "Other").unwrap();
    let config = EngineConfig::new(categories).max_chunk_size(5).chunk_overlap(0);
    let engine = DecisionEngine::new(config, cached.clone()).unwrap();

    let result = engine.classify("footrfootrfootrfootr").await;

    assert_eq!(result.chunks.scored, 4);
    assert_eq!(result.category, "A");
    assert_eq!(oracle.calls(), 1);
}
