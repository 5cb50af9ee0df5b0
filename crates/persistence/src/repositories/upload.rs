//! Upload metadata repository (uploads database).

use async_trait::async_trait;
use domain::models::{AttachmentUpload, IconUpload};
use domain::services::{StoreError, UploadStore};
use sqlx::PgPool;

use crate::entities::{AttachmentUploadRow, IconUploadRow};

/// Repository for upload metadata queries. Holds the uploads-database pool,
/// not the main one.
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for UploadRepository {
    async fn icons_by_uploader(&self, user: &str) -> Result<Vec<IconUpload>, StoreError> {
        let rows = sqlx::query_as::<_, IconUploadRow>(
            r#"
            SELECT id, hash, mime, size, width, height, uploaded_at, used_by
            FROM icons
            WHERE uploader = $1
            ORDER BY uploaded_at, id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| IconUpload {
                id: row.id,
                hash: row.hash,
                mime: row.mime,
                size: row.size,
                width: row.width,
                height: row.height,
                uploaded_at: row.uploaded_at,
                used_by: row.used_by,
            })
            .collect())
    }

    async fn attachments_by_uploader(
        &self,
        user: &str,
    ) -> Result<Vec<AttachmentUpload>, StoreError> {
        let rows = sqlx::query_as::<_, AttachmentUploadRow>(
            r#"
            SELECT id, hash, mime, filename, size, width, height,
                   uploaded_at, used_by
            FROM attachments
            WHERE uploader = $1
            ORDER BY uploaded_at, id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AttachmentUpload {
                id: row.id,
                hash: row.hash,
                mime: row.mime,
                filename: row.filename,
                size: row.size,
                width: row.width,
                height: row.height,
                uploaded_at: row.uploaded_at,
                used_by: row.used_by,
            })
            .collect())
    }
}
