//! Decision engine configuration.

use std::time::Duration;

use crate::segment::Segmenter;
use crate::types::CategorySet;
use crate::{DocsortError, Result};

/// Default window size in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive windows, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;
/// Default threshold below which a non-fallback winner is replaced by the
/// fallback label.
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Settings for [`DecisionEngine`](super::DecisionEngine), fixed at startup.
///
/// ```rust
/// # use docsort::{CategorySet, EngineConfig};
/// # use std::time::Duration;
/// let categories = CategorySet::new(["Invoice", "Contract", "Other"], "Other")?;
/// let config = EngineConfig::new(categories)
///     .max_chunk_size(512)
///     .chunk_overlap(64)
///     .low_confidence_threshold(0.45)
///     .chunk_timeout(Duration::from_secs(20));
/// config.validate()?;
/// # Ok::<(), docsort::DocsortError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub categories: CategorySet,
    /// Window size in characters.
    pub max_chunk_size: usize,
    /// Characters shared by consecutive windows; must be below `max_chunk_size`.
    pub chunk_overlap: usize,
    /// In `[0, 1]`.
    pub low_confidence_threshold: f32,
    /// Oracle calls in flight per document. 1 = sequential.
    pub max_concurrent_chunks: usize,
    /// Per-chunk oracle budget; elapsing fails that chunk only.
    pub chunk_timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            low_confidence_threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            max_concurrent_chunks: 1,
            chunk_timeout: None,
        }
    }

    pub fn max_chunk_size(mut self, chars: usize) -> Self {
        self.max_chunk_size = chars;
        self
    }

    pub fn chunk_overlap(mut self, chars: usize) -> Self {
        self.chunk_overlap = chars;
        self
    }

    pub fn low_confidence_threshold(mut self, threshold: f32) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    pub fn max_concurrent_chunks(mut self, n: usize) -> Self {
        self.max_concurrent_chunks = n;
        self
    }

    pub fn chunk_timeout(mut self, timeout: Duration) -> Self {
        self.chunk_timeout = Some(timeout);
        self
    }

    /// Check every setting, returning the segmenter they describe.
    pub fn validate(&self) -> Result<Segmenter> {
        let segmenter = Segmenter::new(self.max_chunk_size, self.chunk_overlap)?;

        if !(0.0..=1.0).contains(&self.low_confidence_threshold) {
            return Err(DocsortError::Configuration(format!(
                "low_confidence_threshold must be within [0, 1], got {}",
                self.low_confidence_threshold
            )));
        }
        if self.max_concurrent_chunks == 0 {
            return Err(DocsortError::Configuration(
                "max_concurrent_chunks must be at least 1".to_string(),
            ));
        }
        if self.chunk_timeout == Some(Duration::ZERO) {
            return Err(DocsortError::Configuration(
                "chunk_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(segmenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::new(["A", "Other"], "Other").unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::new(categories());
        let segmenter = config.validate().unwrap();
        assert_eq!(segmenter.max_size(), DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(segmenter.overlap(), DEFAULT_CHUNK_OVERLAP);
    }

    #[test]
    fn overlap_must_be_below_chunk_size() {
        let err = EngineConfig::new(categories())
            .max_chunk_size(100)
            .chunk_overlap(100)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DocsortError::Configuration(_)));
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        for threshold in [-0.1, 1.5, f32::NAN] {
            let err = EngineConfig::new(categories())
                .low_confidence_threshold(threshold)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("low_confidence_threshold"));
        }
    }

    #[test]
    fn zero_concurrency_rejected() {
        assert!(EngineConfig::new(categories())
            .max_concurrent_chunks(0)
            .validate()
            .is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(EngineConfig::new(categories())
            .chunk_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
