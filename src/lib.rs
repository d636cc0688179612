//! docsort - chunked document classification
//!
//! This crate classifies documents of any length with a zero-shot classifier
//! that only accepts bounded inputs. Text is split into overlapping windows,
//! each window is scored by a [`ClassifyProvider`](providers::ClassifyProvider),
//! and the per-category scores are averaged into a single decision with a
//! low-confidence fallback.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use docsort::providers::FnClassifier;
//! use docsort::{CategorySet, ClassifyResult, DecisionEngine, EngineConfig, Outcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> docsort::Result<()> {
//! let categories = CategorySet::new(["Invoice", "Contract", "Other"], "Other")?;
//! let oracle = FnClassifier::new("keywords", |text: &str, _labels: &[&str]| {
//!     let invoice = if text.contains("amount due") { 0.9 } else { 0.1 };
//!     Ok(ClassifyResult::from_pairs([
//!         ("Invoice", invoice),
//!         ("Contract", 0.05),
//!         ("Other", 1.0 - invoice - 0.05),
//!     ]))
//! });
//!
//! let engine = DecisionEngine::new(EngineConfig::new(categories), Arc::new(oracle))?;
//! let result = engine.classify("Invoice #42, amount due: 120 EUR").await;
//!
//! assert_eq!(result.category, "Invoice");
//! assert_eq!(result.outcome, Outcome::Classified);
//! # Ok(())
//! # }
//! ```
//!
//! # Ingesting files
//!
//! ```rust,ignore
//! use docsort::service::DocumentService;
//! use docsort::store::MemoryStore;
//!
//! let service = DocumentService::new(engine, Arc::new(MemoryStore::new()));
//! let record = service.ingest("report.pdf", bytes).await?;
//! println!("{} -> {}", record.filename, record.predicted_category);
//! ```

pub mod cache;
#[cfg(any(feature = "server", feature = "cli"))]
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod providers;
pub mod segment;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use engine::{DecisionEngine, EngineConfig};
pub use error::{DocsortError, Result};
pub use segment::{Chunk, Chunks, Segmenter, segment};
pub use service::DocumentService;
pub use version::{PKG_VERSION, version_string};

pub use types::{
    CategorySet, ChunkStats, ClassificationResult, ClassifyResult, DocumentRecord, NewDocument,
    Outcome, ScoreVector,
};
