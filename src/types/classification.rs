//! Document-level classification results.

use serde::{Deserialize, Serialize};

use super::ScoreVector;

/// How the selected category was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The top-ranked category was selected as-is.
    Classified,
    /// The top-ranked category scored below the threshold and was replaced
    /// by the fallback label.
    LowConfidence {
        /// The category that ranked first before the override.
        provisional: String,
    },
    /// No chunk could be scored (empty text, or every oracle call failed).
    Degraded,
}

impl Outcome {
    /// Stable lowercase name, used for metrics labels and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classified => "classified",
            Self::LowConfidence { .. } => "low_confidence",
            Self::Degraded => "degraded",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

/// Chunk accounting for one classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStats {
    /// Chunks produced by segmentation.
    pub total: usize,
    /// Empty or whitespace-only chunks, never sent to the oracle.
    pub skipped: usize,
    /// Chunks whose oracle call failed.
    pub failed: usize,
    /// Chunks that contributed to the averaged scores.
    pub scored: usize,
}

/// Final decision for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Selected category label.
    pub category: String,
    /// Averaged score of the top-ranked category (before any fallback
    /// override); `0.0` on the degraded path.
    pub confidence: f32,
    /// Averaged score for every configured category.
    pub scores: ScoreVector,
    pub outcome: Outcome,
    pub chunks: ChunkStats,
}

impl ClassificationResult {
    /// Whether the fallback label was chosen because nothing could be scored.
    pub fn is_degraded(&self) -> bool {
        self.outcome.is_degraded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Outcome::LowConfidence {
            provisional: "Invoice".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"low_confidence","provisional":"Invoice"}"#);
        assert_eq!(
            serde_json::to_string(&Outcome::Degraded).unwrap(),
            r#"{"kind":"degraded"}"#
        );
    }

    #[test]
    fn outcome_names() {
        assert_eq!(Outcome::Classified.as_str(), "classified");
        assert_eq!(Outcome::Degraded.as_str(), "degraded");
        assert!(Outcome::Degraded.is_degraded());
        assert!(!Outcome::Classified.is_degraded());
    }
}
