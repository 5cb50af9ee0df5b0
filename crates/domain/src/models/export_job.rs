//! Export job model and status lifecycle.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Export job status.
///
/// Jobs are created externally in `pending` and are driven to exactly one
/// terminal state per processing attempt. Terminal states never transition
/// again; retrying requires a new job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportJobStatus {
    Pending,
    Completed,
    Failed,
}

impl ExportJobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExportJobStatus::Pending)
    }
}

impl std::fmt::Display for ExportJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportJobStatus::Pending => write!(f, "pending"),
            ExportJobStatus::Completed => write!(f, "completed"),
            ExportJobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ExportJobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ExportJobStatus::Pending),
            "completed" => Ok(ExportJobStatus::Completed),
            "failed" => Ok(ExportJobStatus::Failed),
            _ => Err(format!("Unknown export job status: {}", s)),
        }
    }
}

/// Full export job record as held by the job store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    /// Opaque job identifier; doubles as the staging filename and the
    /// object storage key.
    pub id: String,

    /// Username of the requesting user.
    pub user: String,

    pub status: ExportJobStatus,

    /// Description of the error that failed the job, if any.
    pub error: Option<String>,

    /// Creation time, epoch seconds.
    pub created_at: i64,

    /// Terminal transition time, epoch seconds.
    pub completed_at: Option<i64>,
}

/// The projection the poller fetches: only what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExport {
    pub id: String,
    pub user: String,
}

/// Current wall-clock time as epoch seconds, the unit used on job records.
pub fn epoch_now() -> i64 {
    Utc::now().timestamp()
}
