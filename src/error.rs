//! docsort error types

use std::time::Duration;

/// docsort error types
#[derive(Debug, thiserror::Error)]
pub enum DocsortError {
    // Configuration errors (fatal at startup)
    #[error("configuration error: {0}")]
    Configuration(String),

    // Oracle/network errors (recoverable per chunk)
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("empty response from classifier")]
    EmptyResponse,

    #[error("classifier call timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid scores from classifier: {0}")]
    InvalidScores(String),

    // Extraction errors
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),

    // Storage errors
    #[error("storage error: {0}")]
    Storage(String),

    #[error("not found: {0}")]
    NotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DocsortError {
    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Rate limits, network failures, server-side 5xx, timeouts and empty
    /// responses are transient. Everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            DocsortError::RateLimited { .. }
            | DocsortError::Http(_)
            | DocsortError::EmptyResponse
            | DocsortError::Timeout(_) => true,
            DocsortError::Api { status, .. } => matches!(status, 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Server-provided retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            DocsortError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for docsort operations
pub type Result<T> = std::result::Result<T, DocsortError>;
