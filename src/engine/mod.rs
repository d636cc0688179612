//! Chunked classification and score aggregation.
//!
//! The [`DecisionEngine`] turns an arbitrarily long text and a single-shot
//! [`ClassifyProvider`] into one category label:
//!
//! ```text
//! text ─► Segmenter ─► chunks ─► oracle (once per non-blank chunk)
//!                                   │
//!                                   ▼
//!                      sum per category ─► ÷ scored chunks
//!                                   │
//!                                   ▼
//!                   rank (ties: declaration order) ─► top (label, score)
//!                                   │
//!                      score < threshold and not fallback?
//!                         yes ─► fallback label, scores untouched
//! ```
//!
//! A chunk whose oracle call fails (error, timeout, malformed scores) is
//! logged and dropped from the average; it never fails the document. When
//! no chunk can be scored the result is the fallback label at confidence
//! `0.0` with [`Outcome::Degraded`].

mod config;

pub use config::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_LOW_CONFIDENCE_THRESHOLD, DEFAULT_MAX_CHUNK_SIZE, EngineConfig,
};

use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::providers::ClassifyProvider;
use crate::segment::{Chunk, Segmenter};
use crate::telemetry;
use crate::types::{
    CategorySet, ChunkStats, ClassificationResult, ClassifyResult, Outcome, ScoreTotals,
};
use crate::{DocsortError, Result};

/// Stateless per-document classifier over an injected oracle.
///
/// Cheap to share behind an `Arc`; every [`classify`](Self::classify) call
/// owns its own accumulator.
pub struct DecisionEngine {
    config: EngineConfig,
    segmenter: Segmenter,
    provider: Arc<dyn ClassifyProvider>,
}

impl DecisionEngine {
    /// Validate `config` and bind it to an oracle.
    ///
    /// Configuration problems surface here, before any document is seen.
    pub fn new(config: EngineConfig, provider: Arc<dyn ClassifyProvider>) -> Result<Self> {
        let segmenter = config.validate()?;
        Ok(Self {
            config,
            segmenter,
            provider,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn categories(&self) -> &CategorySet {
        &self.config.categories
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Classify one document's text. Never fails: oracle errors are absorbed
    /// per chunk and an unscorable document takes the degraded path.
    #[instrument(skip(self, text), fields(provider = self.provider.name(), bytes = text.len()))]
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        let labels = self.config.categories.as_strs();
        let labels = labels.as_slice();

        let mut stats = ChunkStats::default();
        let mut pending: Vec<Chunk<'_>> = Vec::new();
        for chunk in self.segmenter.segment(text) {
            stats.total += 1;
            if chunk.is_blank() {
                stats.skipped += 1;
                metrics::counter!(telemetry::CHUNKS_TOTAL, "status" => "skipped").increment(1);
                continue;
            }
            pending.push(chunk);
        }

        // Every call settles before accumulation starts; `buffered` yields
        // answers in segmentation order.
        let answers: Vec<(Chunk<'_>, Result<ClassifyResult>)> = stream::iter(pending)
            .map(|chunk| async move {
                let answer = self.score_chunk(chunk.text, labels).await;
                (chunk, answer)
            })
            .buffered(self.config.max_concurrent_chunks)
            .collect()
            .await;

        let mut totals = ScoreTotals::new(&self.config.categories);
        for (chunk, answer) in answers {
            match answer {
                Ok(answer) => {
                    let unknown = answer
                        .scores
                        .keys()
                        .filter(|label| !self.config.categories.contains(label))
                        .count();
                    if unknown > 0 {
                        debug!(chunk = chunk.index, unknown, "ignoring labels outside the category set");
                    }
                    totals.accumulate(&answer);
                    stats.scored += 1;
                    metrics::counter!(telemetry::CHUNKS_TOTAL, "status" => "scored").increment(1);
                }
                Err(e) => {
                    warn!(
                        chunk = chunk.index,
                        offset = chunk.offset,
                        error = %e,
                        "chunk classification failed; excluding chunk"
                    );
                    stats.failed += 1;
                    metrics::counter!(telemetry::CHUNKS_TOTAL, "status" => "failed").increment(1);
                }
            }
        }

        let result = self.decide(totals, stats);
        metrics::counter!(telemetry::DOCUMENTS_TOTAL, "outcome" => result.outcome.as_str())
            .increment(1);
        info!(
            category = %result.category,
            confidence = result.confidence,
            outcome = result.outcome.as_str(),
            chunks = stats.total,
            scored = stats.scored,
            failed = stats.failed,
            "document classified"
        );
        result
    }

    /// One oracle call, bounded by the chunk timeout and checked for usable
    /// scores.
    async fn score_chunk(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        let start = Instant::now();
        let call = self.provider.classify(text, labels);
        let answer = match self.config.chunk_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(answer) => answer,
                Err(_) => Err(DocsortError::Timeout(limit)),
            },
            None => call.await,
        };
        let answer = answer.and_then(|a| a.validate().map(|()| a));

        let status = match &answer {
            Ok(_) => "ok",
            Err(DocsortError::Timeout(_)) => "timeout",
            Err(_) => "error",
        };
        self.record_request(start, status);
        answer
    }

    /// Normalize, rank and apply the low-confidence rule.
    fn decide(&self, totals: ScoreTotals, stats: ChunkStats) -> ClassificationResult {
        let categories = &self.config.categories;
        let fallback = categories.fallback();
        let scores = totals.average(stats.scored);

        if stats.scored == 0 {
            warn!(
                chunks = stats.total,
                skipped = stats.skipped,
                failed = stats.failed,
                "no chunk could be scored; using fallback category"
            );
            return ClassificationResult {
                category: fallback.to_string(),
                confidence: 0.0,
                scores,
                outcome: Outcome::Degraded,
                chunks: stats,
            };
        }

        let (top, confidence) = scores
            .ranked()
            .first()
            .map(|&(label, score)| (label.to_string(), score))
            .unwrap_or_else(|| (fallback.to_string(), 0.0));

        let (category, outcome) = if confidence < self.config.low_confidence_threshold
            && !categories.is_fallback(&top)
        {
            (fallback.to_string(), Outcome::LowConfidence { provisional: top })
        } else {
            (top, Outcome::Classified)
        };

        ClassificationResult {
            category,
            confidence,
            scores,
            outcome,
            chunks: stats,
        }
    }

    fn record_request(&self, start: Instant, status: &'static str) {
        let provider = self.provider.name().to_owned();
        metrics::counter!(telemetry::ORACLE_REQUESTS_TOTAL,
            "provider" => provider.clone(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::ORACLE_DURATION_SECONDS,
            "provider" => provider,
        )
        .record(start.elapsed().as_secs_f64());
    }
}
