use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::DocsortError;

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// A [`DocsortError`] on its way to an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DocsortError);

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self(DocsortError::InvalidInput(detail.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DocsortError::UnsupportedFileType(_) | DocsortError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            DocsortError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DocsortError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            DocsortError::UnsupportedFileType(msg)
            | DocsortError::InvalidInput(msg)
            | DocsortError::Extraction(msg) => msg.clone(),
            DocsortError::NotFound(what) => format!("{what} not found"),
            other => format!("Internal error: {other}"),
        }
    }
}

impl From<DocsortError> for ApiError {
    fn from(e: DocsortError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
