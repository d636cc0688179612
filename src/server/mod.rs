//! HTTP service for docsortd.
//!
//! Exposes the [`DocumentService`] over axum:
//!
//! | Method | Path              | Purpose                         |
//! |--------|-------------------|---------------------------------|
//! | GET    | `/health`         | liveness                        |
//! | POST   | `/upload`         | extract, classify, store a file |
//! | GET    | `/documents`      | list stored documents           |
//! | GET    | `/documents/{id}` | one stored document             |

mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use handlers::{HealthResponse, UploadResponse};
pub use router::create_router;

use std::sync::Arc;

use crate::DocumentService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DocumentService>,
}

impl AppState {
    pub fn new(service: DocumentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
