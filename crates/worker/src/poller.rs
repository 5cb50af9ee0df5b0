//! Pending-job polling.

use domain::models::PendingExport;
use domain::services::ExportJobStore;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::WorkerError;
use crate::notifier::JobStatusNotifier;
use crate::pipeline::ExportPipeline;

/// Drains the pending queue one job at a time.
///
/// A failed job is routed to the failed path and the drain continues; only
/// a failed fetch or a failed failure-report stops the poller.
pub struct JobPoller {
    jobs: Arc<dyn ExportJobStore>,
    pipeline: ExportPipeline,
    notifier: JobStatusNotifier,
}

impl JobPoller {
    pub fn new(
        jobs: Arc<dyn ExportJobStore>,
        pipeline: ExportPipeline,
        notifier: JobStatusNotifier,
    ) -> Self {
        Self {
            jobs,
            pipeline,
            notifier,
        }
    }

    /// Fetch the pending snapshot and process every job in it.
    ///
    /// Returns the number of jobs processed, terminal outcomes of either
    /// kind included.
    pub async fn poll_once(&self) -> Result<usize, WorkerError> {
        let pending = self
            .jobs
            .find_pending()
            .await
            .map_err(WorkerError::FetchPending)?;

        if pending.is_empty() {
            debug!("No pending export jobs");
            return Ok(0);
        }

        info!(jobs = pending.len(), "Processing pending export jobs");
        for job in &pending {
            self.process(job).await?;
        }
        Ok(pending.len())
    }

    /// Run one job to a terminal status.
    ///
    /// The success path falls through to the failed path if recording
    /// success does not stick, so every processed job ends up terminal. A
    /// failed-path error is fatal; there is nowhere left to record the job's
    /// outcome.
    async fn process(&self, job: &PendingExport) -> Result<(), WorkerError> {
        let outcome = match self.pipeline.execute(job).await {
            Ok(()) => match self.notifier.mark_completed(job).await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            },
            Err(err) => err,
        };

        self.notifier
            .mark_failed(job, &outcome)
            .await
            .map_err(|source| WorkerError::FailureReport {
                job_id: job.id.clone(),
                source,
            })
    }
}
