use axum::Json;
use axum::extract::{Multipart, Path, State};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::AppState;
use super::error::ApiError;
use crate::extract;
use crate::types::{DocumentRecord, Outcome, ScoreVector};

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: i64,
    pub filename: String,
    pub predicted_category: String,
    pub confidence_scores: ScoreVector,
    pub outcome: Outcome,
}

impl From<DocumentRecord> for UploadResponse {
    fn from(record: DocumentRecord) -> Self {
        Self {
            message: "File uploaded and classified successfully".to_string(),
            id: record.id,
            filename: record.filename,
            predicted_category: record.predicted_category,
            confidence_scores: record.confidence_scores,
            outcome: record.outcome,
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "skipping multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        // Reject by extension before buffering the body.
        extract::detect(&filename).inspect_err(|_| {
            warn!(%filename, "unsupported upload type");
        })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;
        debug!(%filename, bytes = data.len(), "file received");

        let record = state.service.ingest(&filename, data.to_vec()).await?;
        info!(id = record.id, %filename, "upload classified");
        return Ok(Json(record.into()));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

#[instrument(skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentRecord>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentRecord>, ApiError> {
    Ok(Json(state.service.get(id).await?))
}
