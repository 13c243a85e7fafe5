use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing record mutations and summary traffic.
#[derive(Default)]
pub struct ServiceMetrics {
    records_created: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
    remote_summaries: AtomicU64,
    fallback_summaries: AtomicU64,
    summary_failures: AtomicU64,
}

impl ServiceMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful create.
    pub fn record_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful update.
    pub fn record_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful delete.
    pub fn record_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a summary produced by the remote generation service.
    pub fn record_remote_summary(&self) {
        self.remote_summaries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a summary produced by the local template.
    pub fn record_fallback_summary(&self) {
        self.fallback_summaries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a summary request that ended in an error.
    pub fn record_summary_failure(&self) {
        self.summary_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            remote_summaries: self.remote_summaries.load(Ordering::Relaxed),
            fallback_summaries: self.fallback_summaries.load(Ordering::Relaxed),
            summary_failures: self.summary_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of service counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Records admitted through create since startup.
    pub records_created: u64,
    /// Records replaced through update since startup.
    pub records_updated: u64,
    /// Records removed through delete since startup.
    pub records_deleted: u64,
    /// Summaries returned by the remote generation service.
    pub remote_summaries: u64,
    /// Summaries built from the local template.
    pub fallback_summaries: u64,
    /// Summary requests that failed.
    pub summary_failures: u64,
}
