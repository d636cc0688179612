//! Caching oracle decorator.

use std::sync::Arc;

use async_trait::async_trait;

use super::traits::ClassifyProvider;
use crate::Result;
use crate::cache::{CacheConfig, ResponseCache};
use crate::types::ClassifyResult;

/// Decorator that answers repeated (text, labels) pairs from a
/// [`ResponseCache`]. Errors are never cached.
pub struct CachingClassifyProvider {
    inner: Arc<dyn ClassifyProvider>,
    cache: ResponseCache,
}

impl CachingClassifyProvider {
    pub fn new(inner: Arc<dyn ClassifyProvider>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(config),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[async_trait]
impl ClassifyProvider for CachingClassifyProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        let provider = self.inner.name();
        if let Some(answer) = self.cache.get(provider, text, labels).await {
            return Ok(answer);
        }
        let answer = self.inner.classify(text, labels).await?;
        self.cache
            .insert(provider, text, labels, answer.clone())
            .await;
        Ok(answer)
    }
}
