//! Service facade shared by the HTTP surface: record operations plus summaries.

use crate::{
    metrics::{MetricsSnapshot, ServiceMetrics},
    records::{InMemoryRecordStore, RecordError, RecordStore, StudentRecord, validate_id},
    summarization::{SummaryError, SummaryGenerator, SummaryMode},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors emitted by the student service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Record validation or lookup failed.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// Summary generation failed.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Abstraction over the student service used by the HTTP router.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Admit a new record.
    async fn create_student(&self, record: StudentRecord) -> Result<StudentRecord, ServiceError>;

    /// List every stored record.
    async fn list_students(&self) -> Vec<StudentRecord>;

    /// Fetch one record.
    async fn get_student(&self, id: i64) -> Result<StudentRecord, ServiceError>;

    /// Replace one record; `record.id` must equal `id`.
    async fn update_student(
        &self,
        id: i64,
        record: StudentRecord,
    ) -> Result<StudentRecord, ServiceError>;

    /// Remove one record.
    async fn delete_student(&self, id: i64) -> Result<(), ServiceError>;

    /// Summarize the record stored under `id`.
    async fn summarize_student(&self, id: i64) -> Result<String, ServiceError>;

    /// Strategy the summary generator was started with.
    fn summary_mode(&self) -> SummaryMode;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Owns the record store and the summary generator.
///
/// Construct once near process start and share through an `Arc`.
pub struct StudentService {
    store: Arc<dyn RecordStore>,
    summaries: SummaryGenerator,
    metrics: ServiceMetrics,
}

impl StudentService {
    /// Build a service over an explicit store and generator.
    pub fn new(store: Arc<dyn RecordStore>, summaries: SummaryGenerator) -> Self {
        Self {
            store,
            summaries,
            metrics: ServiceMetrics::new(),
        }
    }

    /// Build a service over an empty in-memory store.
    pub fn in_memory(summaries: SummaryGenerator) -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()), summaries)
    }
}

#[async_trait]
impl StudentApi for StudentService {
    async fn create_student(&self, record: StudentRecord) -> Result<StudentRecord, ServiceError> {
        let created = self.store.create(record).await?;
        self.metrics.record_created();
        Ok(created)
    }

    async fn list_students(&self) -> Vec<StudentRecord> {
        self.store.get_all().await
    }

    async fn get_student(&self, id: i64) -> Result<StudentRecord, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    async fn update_student(
        &self,
        id: i64,
        record: StudentRecord,
    ) -> Result<StudentRecord, ServiceError> {
        let updated = self.store.update(id, record).await?;
        self.metrics.record_updated();
        Ok(updated)
    }

    async fn delete_student(&self, id: i64) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        self.metrics.record_deleted();
        Ok(())
    }

    async fn summarize_student(&self, id: i64) -> Result<String, ServiceError> {
        validate_id(id)?;
        let record = self.store.get(id).await?;

        tracing::info!(student_id = id, mode = ?self.summaries.mode(), "Generating summary");
        match self.summaries.generate(&record).await {
            Ok(summary) => {
                match self.summaries.mode() {
                    SummaryMode::Remote => self.metrics.record_remote_summary(),
                    SummaryMode::Fallback => self.metrics.record_fallback_summary(),
                }
                tracing::info!(student_id = id, "Summary generated");
                Ok(summary)
            }
            Err(error) => {
                self.metrics.record_summary_failure();
                tracing::error!(student_id = id, error = %error, "Summary generation failed");
                Err(error.into())
            }
        }
    }

    fn summary_mode(&self) -> SummaryMode {
        self.summaries.mode()
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
