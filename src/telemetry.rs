//! Telemetry metric name constants.
//!
//! Centralised metric names for docsort operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `docsort_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: oracle name (e.g. "huggingface")
//! - `status`: outcome of a call or chunk
//! - `outcome`: document decision: "classified", "low_confidence" or "degraded"

/// Total oracle calls issued by the decision engine.
///
/// Labels: `provider`, `status` ("ok" | "error" | "timeout").
pub const ORACLE_REQUESTS_TOTAL: &str = "docsort_oracle_requests_total";

/// Oracle call duration in seconds.
///
/// Labels: `provider`.
pub const ORACLE_DURATION_SECONDS: &str = "docsort_oracle_duration_seconds";

/// Chunks seen by the decision engine.
///
/// Labels: `status` ("scored" | "skipped" | "failed").
pub const CHUNKS_TOTAL: &str = "docsort_chunks_total";

/// Documents classified.
///
/// Labels: `outcome`.
pub const DOCUMENTS_TOTAL: &str = "docsort_documents_total";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "docsort_retries_total";

/// Oracle answers served from the chunk cache.
pub const CACHE_HITS_TOTAL: &str = "docsort_cache_hits_total";

/// Oracle calls that missed the chunk cache.
pub const CACHE_MISSES_TOTAL: &str = "docsort_cache_misses_total";
