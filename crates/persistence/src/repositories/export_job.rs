//! Export job repository.
//!
//! The only writer of job status in the whole system. Both updates set a
//! terminal state; nothing here ever moves a job back to pending.

use async_trait::async_trait;
use domain::models::PendingExport;
use domain::services::{ExportJobStore, StoreError};
use sqlx::PgPool;

use crate::entities::PendingExportRow;

/// Repository for export job database operations.
#[derive(Clone)]
pub struct ExportJobRepository {
    pool: PgPool,
}

impl ExportJobRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExportJobStore for ExportJobRepository {
    async fn find_pending(&self) -> Result<Vec<PendingExport>, StoreError> {
        let rows = sqlx::query_as::<_, PendingExportRow>(
            r#"
            SELECT id, user_id
            FROM export_jobs
            WHERE status = 'pending'
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PendingExport {
                id: row.id,
                user: row.user_id,
            })
            .collect())
    }

    async fn mark_completed(&self, job_id: &str, completed_at: i64) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE export_jobs
            SET status = 'completed', completed_at = $2
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_failed(
        &self,
        job_id: &str,
        error: &str,
        completed_at: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE export_jobs
            SET status = 'failed', error = $2, completed_at = $3
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(error)
        .bind(completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
