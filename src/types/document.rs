//! Persisted document records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClassificationResult, Outcome, ScoreVector};

/// A classified document about to be stored.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub content: String,
    pub upload_time: DateTime<Utc>,
    pub classification: ClassificationResult,
}

impl NewDocument {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        classification: ClassificationResult,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            upload_time: Utc::now(),
            classification,
        }
    }
}

/// A stored document with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub filename: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub content: String,
    pub upload_time: DateTime<Utc>,
    pub predicted_category: String,
    pub confidence_scores: ScoreVector,
    pub outcome: Outcome,
}

impl DocumentRecord {
    /// Build the stored form of `doc` under the id the store assigned.
    pub fn from_new(id: i64, doc: NewDocument) -> Self {
        Self {
            id,
            filename: doc.filename,
            content: doc.content,
            upload_time: doc.upload_time,
            predicted_category: doc.classification.category,
            confidence_scores: doc.classification.scores,
            outcome: doc.classification.outcome,
        }
    }
}
