//! HuggingFace Inference API client for zero-shot classification.
//!
//! Uses the serverless `zero-shot-classification` pipeline, which scores a
//! text against arbitrary candidate labels with an NLI model.
//! See: <https://huggingface.co/docs/api-inference/index>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::ClassifyProvider;
use crate::{ClassifyResult, DocsortError, Result};

/// Default base URL for HuggingFace Inference API
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Zero-shot model used when none is configured.
pub const DEFAULT_MODEL: &str = "facebook/bart-large-mnli";

/// Client for HuggingFace zero-shot classification.
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    model: String,
    http: Client,
    base_url: String,
}

impl HuggingFaceClient {
    /// Create a client for `model` with the given API key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                DocsortError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            http,
            base_url: base_url.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Perform zero-shot classification of `text` against `labels`.
    pub async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ZeroShotRequest {
                inputs: text,
                parameters: ZeroShotParameters {
                    candidate_labels: labels,
                },
            })
            .send()
            .await
            .map_err(|e| DocsortError::Http(e.to_string()))?;

        self.handle_response_errors(&response)?;

        let result: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| DocsortError::Http(e.to_string()))?;

        if result.labels.is_empty() {
            return Err(DocsortError::EmptyResponse);
        }
        if result.labels.len() != result.scores.len() {
            return Err(DocsortError::InvalidScores(format!(
                "{} labels but {} scores",
                result.labels.len(),
                result.scores.len()
            )));
        }

        Ok(ClassifyResult::from_pairs(
            result.labels.into_iter().zip(result.scores),
        ))
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(DocsortError::AuthenticationFailed),
            404 => Err(DocsortError::ModelNotFound(self.model.clone())),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(DocsortError::RateLimited { retry_after })
            }
            503 => Err(DocsortError::Api {
                status: 503,
                message: "Model is loading, please retry".to_string(),
            }),
            code => Err(DocsortError::Api {
                status: code,
                message: format!("HuggingFace API error: {}", status),
            }),
        }
    }
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[async_trait]
impl ClassifyProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str, labels: &[&str]) -> Result<ClassifyResult> {
        HuggingFaceClient::classify(self, text, labels).await
    }
}
