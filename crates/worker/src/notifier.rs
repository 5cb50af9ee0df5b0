//! Terminal job transitions and their inbox alerts.

use domain::models::{epoch_now, PendingExport};
use domain::services::{ControlBus, ExportJobStore, UserAlert};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ExportError;

/// Records a job's terminal status and tells the user about it.
///
/// The status write happens first in both paths: a job whose alert was lost
/// is still terminal, while a job alerted before its status landed could be
/// picked up again.
pub struct JobStatusNotifier {
    jobs: Arc<dyn ExportJobStore>,
    bus: Arc<dyn ControlBus>,
}

impl JobStatusNotifier {
    pub fn new(jobs: Arc<dyn ExportJobStore>, bus: Arc<dyn ControlBus>) -> Self {
        Self { jobs, bus }
    }

    /// Record success and alert the user that the archive is ready.
    pub async fn mark_completed(&self, job: &PendingExport) -> Result<(), ExportError> {
        self.jobs.mark_completed(&job.id, epoch_now()).await?;

        let alert = UserAlert::export_ready(&job.user);
        self.bus.publish_inbox(&alert.encode()?).await?;

        info!(job_id = %job.id, user = %job.user, "Export completed");
        Ok(())
    }

    /// Record failure with the causing error's message and alert the user.
    pub async fn mark_failed(
        &self,
        job: &PendingExport,
        cause: &ExportError,
    ) -> Result<(), ExportError> {
        error!(job_id = %job.id, user = %job.user, error = %cause, "Export failed");

        self.jobs
            .mark_failed(&job.id, &cause.to_string(), epoch_now())
            .await?;

        let alert = UserAlert::export_failed(&job.user);
        self.bus.publish_inbox(&alert.encode()?).await?;

        Ok(())
    }
}
