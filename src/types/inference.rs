//! Oracle answer types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{DocsortError, Result};

/// One oracle answer for one chunk of text.
///
/// Covers any subset of the candidate labels. Scores need not sum to one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub scores: HashMap<String, f32>,
}

impl ClassifyResult {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            scores: pairs.into_iter().map(|(l, s)| (l.into(), s)).collect(),
        }
    }

    /// Score for a label, `0.0` when the oracle did not report it.
    pub fn score(&self, label: &str) -> f32 {
        self.scores.get(label).copied().unwrap_or(0.0)
    }

    /// Reject scores that cannot be summed meaningfully.
    pub(crate) fn validate(&self) -> Result<()> {
        for (label, score) in &self.scores {
            if !score.is_finite() || *score < 0.0 {
                return Err(DocsortError::InvalidScores(format!(
                    "label '{label}' has score {score}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_scores_zero() {
        let answer = ClassifyResult::from_pairs([("A", 0.7)]);
        assert_eq!(answer.score("A"), 0.7);
        assert_eq!(answer.score("B"), 0.0);
    }

    #[test]
    fn validate_rejects_nan_and_negative() {
        assert!(ClassifyResult::from_pairs([("A", f32::NAN)]).validate().is_err());
        assert!(ClassifyResult::from_pairs([("A", -0.1)]).validate().is_err());
        assert!(ClassifyResult::from_pairs([("A", f32::INFINITY)]).validate().is_err());
        assert!(ClassifyResult::from_pairs([("A", 3.5)]).validate().is_ok());
    }
}
