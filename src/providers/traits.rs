//! The classifier oracle seam.
//!
//! The decision engine only ever sees a [`ClassifyProvider`]: a single-shot
//! text classifier that scores one chunk against the candidate labels.
//! Remote clients, decorators (`RetryingClassifyProvider`,
//! `CachingClassifyProvider`) and test doubles all implement it.
//!
//! # Contract
//!
//! - The answer may cover any subset of `labels`, in any order, and need
//!   not be normalized.
//! - Any call may fail; the engine treats a failure as affecting that chunk
//!   only.
//! - Implementations must tolerate concurrent calls on the same instance
//!   (the engine may dispatch several chunks at once).

use async_trait::async_trait;

use crate::Result;
use crate::types::ClassifyResult;

/// Single-shot text classifier.
#[async_trait]
pub trait ClassifyProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Score `text` against the candidate `labels`.
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult>;
}

/// Adapts a synchronous closure into a [`ClassifyProvider`].
///
/// ```rust
/// use docsort::providers::FnClassifier;
/// use docsort::ClassifyResult;
///
/// let oracle = FnClassifier::new("keywords", |text: &str, _labels: &[&str]| {
///     let invoice = if text.contains("invoice") { 0.9 } else { 0.1 };
///     Ok(ClassifyResult::from_pairs([("Invoice", invoice), ("Other", 1.0 - invoice)]))
/// });
/// ```
pub struct FnClassifier<F> {
    name: String,
    f: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&str, &[&str]) -> Result<ClassifyResult> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> ClassifyProvider for FnClassifier<F>
where
    F: Fn(&str, &[&str]) -> Result<ClassifyResult> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        (self.f)(text, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocsortError;

    #[tokio::test]
    async fn fn_classifier_forwards_arguments() {
        let oracle = FnClassifier::new("echo", |text: &str, labels: &[&str]| {
            Ok(ClassifyResult::from_pairs([(labels[0], text.len() as f32)]))
        });

        let answer = oracle.classify("abcd", &["A", "B"]).await.unwrap();
        assert_eq!(answer.score("A"), 4.0);
        assert_eq!(oracle.name(), "echo");
    }

    #[tokio::test]
    async fn fn_classifier_propagates_errors() {
        let oracle = FnClassifier::new("broken", |_: &str, _: &[&str]| {
            Err(DocsortError::EmptyResponse)
        });
        assert!(oracle.classify("x", &["A"]).await.is_err());
    }
}
