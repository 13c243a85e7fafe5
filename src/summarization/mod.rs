//! Natural-language summaries of student records.
//!
//! The generation mode is decided once, at startup, by probing the remote service. When the
//! probe succeeds every summary goes through the remote model and remote failures are returned
//! to the caller as errors; when it fails every summary is built from a fixed local template.
//! A request never switches modes.

mod ollama;

pub use ollama::OllamaSummaryClient;

use crate::config::Config;
use crate::records::StudentRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while producing a summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// Remote call failed in transport, status, decoding, or content.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// The selected strategy produced no text.
    #[error("Generated summary is empty")]
    EmptySummary,
}

/// Interface implemented by remote text-generation backends.
#[async_trait]
pub trait SummaryClient: Send + Sync {
    /// Generate text for `prompt`, returning a non-empty summary or an error.
    async fn generate(&self, prompt: String) -> Result<String, SummaryError>;
}

/// Which strategy the generator was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Summaries come from the remote generation service.
    Remote,
    /// Summaries come from the local template.
    Fallback,
}

/// Closed set of summary strategies.
#[derive(Clone)]
pub enum SummaryStrategy {
    /// Delegate to a remote generation client.
    Remote(Arc<dyn SummaryClient>),
    /// Build a deterministic sentence from the record fields.
    Fallback,
}

/// Produces summaries using the strategy chosen at startup.
#[derive(Clone)]
pub struct SummaryGenerator {
    strategy: SummaryStrategy,
}

impl SummaryGenerator {
    /// Wrap an explicit strategy.
    pub fn new(strategy: SummaryStrategy) -> Self {
        Self { strategy }
    }

    /// Generator that always calls `client`.
    pub fn remote(client: Arc<dyn SummaryClient>) -> Self {
        Self::new(SummaryStrategy::Remote(client))
    }

    /// Generator that always uses the local template.
    pub fn fallback() -> Self {
        Self::new(SummaryStrategy::Fallback)
    }

    /// Probe the configured Ollama host once and pick the strategy for the process lifetime.
    pub async fn probe(config: &Config) -> Self {
        let client = match OllamaSummaryClient::new(
            config.ollama_host.clone(),
            config.summary_model.clone(),
            config.summary_timeout(),
        ) {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "Could not build Ollama client; using fallback summaries"
                );
                return Self::fallback();
            }
        };

        if client.is_available(config.probe_timeout()).await {
            tracing::info!(
                host = %client.base_url(),
                model = %config.summary_model,
                "Ollama is available and will be used for generating summaries"
            );
            Self::remote(Arc::new(client))
        } else {
            tracing::info!(
                host = %client.base_url(),
                "Ollama is not available; fallback summaries will be used"
            );
            Self::fallback()
        }
    }

    /// Strategy selected for this generator.
    pub fn mode(&self) -> SummaryMode {
        match self.strategy {
            SummaryStrategy::Remote(_) => SummaryMode::Remote,
            SummaryStrategy::Fallback => SummaryMode::Fallback,
        }
    }

    /// Produce a summary for `record` with the configured strategy.
    pub async fn generate(&self, record: &StudentRecord) -> Result<String, SummaryError> {
        let summary = match &self.strategy {
            SummaryStrategy::Remote(client) => client.generate(build_prompt(record)).await?,
            SummaryStrategy::Fallback => fallback_summary(record),
        };
        if summary.is_empty() {
            return Err(SummaryError::EmptySummary);
        }
        Ok(summary)
    }
}

/// Prompt sent to the remote model for `record`.
pub fn build_prompt(record: &StudentRecord) -> String {
    format!(
        "Summarize this student profile using only the provided details. \
         Be brief, accurate, and creative:\n\n\
         Profile:\n- Name: {}\n- Age: {}\n- Email: {}\n\n\
         Note: Make the summary catchy and to the point without adding any extra information.",
        record.name, record.age, record.email
    )
}

/// Deterministic template used when the remote service is unavailable.
pub fn fallback_summary(record: &StudentRecord) -> String {
    format!(
        "Student {} is {} years old and can be contacted at {}.",
        record.name, record.age, record.email
    )
}
