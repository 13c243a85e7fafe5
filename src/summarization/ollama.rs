//! Ollama-backed generation client.
//!
//! Talks to two endpoints: `GET /api/tags` for the startup availability probe and
//! `POST /api/generate` (non-streaming) for the summary itself.

use super::{SummaryClient, SummaryError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// HTTP client for an Ollama runtime.
#[derive(Clone)]
pub struct OllamaSummaryClient {
    http: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaSummaryClient {
    /// Build a client for `base_url` requesting `model`, bounding each generation by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummaryError> {
        let http = Client::builder()
            .user_agent("student-records/summary")
            .build()
            .map_err(|error| {
                SummaryError::GenerationFailed(format!("failed to build HTTP client: {error}"))
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        })
    }

    /// Base address of the runtime.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Check whether the runtime answers `GET /api/tags` with `200 OK` within `timeout`.
    ///
    /// Failures are logged and reported as `false`; they are never surfaced to callers.
    pub async fn is_available(&self, timeout: Duration) -> bool {
        let url = self.endpoint("api/tags");
        match self.http.get(&url).timeout(timeout).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::warn!(
                    url = %url,
                    status = %response.status(),
                    "Ollama probe returned non-OK status"
                );
                false
            }
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "Error checking Ollama availability");
                false
            }
        }
    }
}

#[async_trait]
impl SummaryClient for OllamaSummaryClient {
    async fn generate(&self, prompt: String) -> Result<String, SummaryError> {
        let url = self.endpoint("api/generate");
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        tracing::debug!(url = %url, model = %self.model, "Sending request to Ollama");
        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummaryError::GenerationFailed(format!(
                    "error making POST request to Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "Received response from Ollama");
        let body = response.text().await.map_err(|error| {
            SummaryError::GenerationFailed(format!("error reading response body: {error}"))
        })?;

        if !status.is_success() {
            return Err(SummaryError::GenerationFailed(format!(
                "Ollama API returned non-success status {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|error| {
            SummaryError::GenerationFailed(format!(
                "unexpected response format from Ollama: {error}"
            ))
        })?;

        if parsed.response.is_empty() {
            return Err(SummaryError::GenerationFailed(
                "Ollama returned an empty summary".into(),
            ));
        }
        Ok(parsed.response)
    }
}
