//! Request metrics collector.
//!
//! Uses atomics for the counters behind a registry keyed by job name, so
//! recording a hit on an already-known job takes only a read lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

/// Result status of a handled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request was answered successfully.
    Success,
    /// The request failed.
    Error,
    /// The sequence was returned but recording the occurrence failed.
    ErrorOnStatSave,
}

impl Outcome {
    /// Label used in the Prometheus exposition.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Error => "error",
            Outcome::ErrorOnStatSave => "error_on_stat_save",
        }
    }
}

/// Per-job counter bucket.
#[derive(Default)]
struct JobCounters {
    requests: AtomicU64,
    success: AtomicU64,
    error: AtomicU64,
    error_on_stat_save: AtomicU64,
}

impl JobCounters {
    fn bump(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Success => &self.success,
            Outcome::Error => &self.error,
            Outcome::ErrorOnStatSave => &self.error_on_stat_save,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time counter values for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub job: String,
    pub requests: u64,
    pub success: u64,
    pub error: u64,
    pub error_on_stat_save: u64,
}

/// Collects request/outcome counters across all endpoints.
#[derive(Clone, Default)]
pub struct RequestMetrics {
    /// Per-job counters: job name → counters.
    jobs: Arc<RwLock<HashMap<String, Arc<JobCounters>>>>,
}

impl RequestMetrics {
    /// Create a new, empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one inbound request for a job.
    pub async fn record_request(&self, job: &str) {
        let counters = self.counters_for(job).await;
        counters.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a handled request.
    pub async fn record_outcome(&self, job: &str, outcome: Outcome) {
        let counters = self.counters_for(job).await;
        counters.bump(outcome);
    }

    async fn counters_for(&self, job: &str) -> Arc<JobCounters> {
        {
            let jobs = self.jobs.read().await;
            if let Some(counters) = jobs.get(job) {
                return counters.clone();
            }
        }
        let mut jobs = self.jobs.write().await;
        let counters = jobs
            .entry(job.to_string())
            .or_insert_with(|| {
                debug!(%job, "registered job for metrics collection");
                Arc::new(JobCounters::default())
            });
        counters.clone()
    }

    /// Current counter values for all jobs, sorted by job name.
    pub async fn snapshot(&self) -> Vec<JobSnapshot> {
        let jobs = self.jobs.read().await;
        let mut snapshots: Vec<JobSnapshot> = jobs
            .iter()
            .map(|(job, c)| JobSnapshot {
                job: job.clone(),
                requests: c.requests.load(Ordering::Relaxed),
                success: c.success.load(Ordering::Relaxed),
                error: c.error.load(Ordering::Relaxed),
                error_on_stat_save: c.error_on_stat_save.load(Ordering::Relaxed),
            })
            .collect();
        snapshots.sort_by(|a, b| a.job.cmp(&b.job));
        snapshots
    }
}
