//! Worker error types.
//!
//! Two tiers: [`ExportError`] aborts the current job and routes it to the
//! failed path; [`WorkerError`] takes the whole process down.

use domain::services::{BusError, StoreError};
use thiserror::Error;

/// Errors that fail a single export job.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Source read error: {0}")]
    Source(#[from] StoreError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Notification error: {0}")]
    Notify(#[from] BusError),

    #[error("Alert encode error: {0}")]
    AlertEncode(#[from] rmp_serde::encode::Error),
}

/// Errors fatal to the worker process.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// A newer instance announced itself; this one must exit immediately.
    #[error("Another worker instance has taken over")]
    Superseded,

    /// The pending-jobs fetch failed; the poller cannot safely continue.
    #[error("Failed to fetch pending jobs: {0}")]
    FetchPending(#[source] StoreError),

    /// The failed path itself failed. There is no further fallback: a
    /// failure-reporting failure is never hidden.
    #[error("Failure reporting failed for job {job_id}: {source}")]
    FailureReport {
        job_id: String,
        #[source]
        source: ExportError,
    },

    #[error("Coordination bus error: {0}")]
    Bus(#[from] BusError),
}
