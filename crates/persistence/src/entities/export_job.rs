//! Export job entities.

use sqlx::FromRow;

/// The pending-job projection the poller works from. Only id and user are
/// fetched; the rest of the row stays in the database until the terminal
/// update.
#[derive(Debug, Clone, FromRow)]
pub struct PendingExportRow {
    /// Opaque job identifier; also the staging filename and object key.
    pub id: String,

    /// Username of the requesting user.
    pub user_id: String,
}
