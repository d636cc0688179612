//! Ingestion pipeline: extract, classify, persist.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::engine::DecisionEngine;
use crate::extract::{self, DocumentKind};
use crate::store::DocumentStore;
use crate::types::{ClassificationResult, DocumentRecord, NewDocument};
use crate::{DocsortError, Result};

/// Ties a [`DecisionEngine`] to a [`DocumentStore`].
///
/// Shared by the HTTP handlers and the CLI; clone the `Arc`s, not the
/// service.
pub struct DocumentService {
    engine: Arc<DecisionEngine>,
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(engine: DecisionEngine, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Extract text from an uploaded file, classify it and store the result.
    ///
    /// Fails with [`DocsortError::UnsupportedFileType`] before reading any
    /// bytes when the extension is not recognised.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn ingest(&self, filename: &str, bytes: Vec<u8>) -> Result<DocumentRecord> {
        let kind = extract::detect(filename)?;
        let content = extract_blocking(kind, bytes).await?;
        let classification = self.engine.classify(&content).await;

        let record = self
            .store
            .insert(NewDocument::new(filename, content, classification))
            .await?;
        info!(
            id = record.id,
            category = %record.predicted_category,
            kind = kind.as_str(),
            "document stored"
        );
        Ok(record)
    }

    /// Classify already-extracted text without storing it.
    pub async fn classify_text(&self, text: &str) -> ClassificationResult {
        self.engine.classify(text).await
    }

    /// Extract and classify a file without storing it.
    pub async fn classify_file(&self, filename: &str, bytes: Vec<u8>) -> Result<ClassificationResult> {
        let kind = extract::detect(filename)?;
        let content = extract_blocking(kind, bytes).await?;
        Ok(self.engine.classify(&content).await)
    }

    pub async fn get(&self, id: i64) -> Result<DocumentRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DocsortError::NotFound(format!("document {id}")))
    }

    pub async fn list(&self) -> Result<Vec<DocumentRecord>> {
        self.store.list().await
    }
}

async fn extract_blocking(kind: DocumentKind, bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || extract::extract_text(kind, &bytes))
        .await
        .map_err(|e| DocsortError::Extraction(format!("extraction task failed: {e}")))?
}
