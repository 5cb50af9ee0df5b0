//! Datastore contracts.

use crate::models::{
    AttachmentUpload, Chat, IconUpload, PendingExport, Post, Report, UserExport,
};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by datastore collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Object storage error: {0}")]
    ObjectStorage(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// The job store: the single source of truth for job status.
///
/// Status rows are mutated exclusively through this trait, and only to a
/// terminal state. No row-level lock is taken; the at-most-one-active-worker
/// coordination protocol is what prevents concurrent mutation.
#[async_trait]
pub trait ExportJobStore: Send + Sync {
    /// Every job still in `pending`, projected to id + user only.
    async fn find_pending(&self) -> Result<Vec<PendingExport>, StoreError>;

    async fn mark_completed(&self, job_id: &str, completed_at: i64) -> Result<(), StoreError>;

    async fn mark_failed(
        &self,
        job_id: &str,
        error: &str,
        completed_at: i64,
    ) -> Result<(), StoreError>;
}

/// The profile/content store: read-only snapshot queries by user.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Profile, settings, relationships, and network log combined, with
    /// secret fields excluded.
    async fn user_export(&self, user: &str) -> Result<UserExport, StoreError>;

    /// Reports in which `user` appears among the reporters.
    async fn reports_for_reporter(&self, user: &str) -> Result<Vec<Report>, StoreError>;

    /// Chats whose member list contains `user`.
    async fn chats_with_member(&self, user: &str) -> Result<Vec<Chat>, StoreError>;

    /// Distinct post origins `user` has posted under.
    async fn post_origins(&self, user: &str) -> Result<Vec<String>, StoreError>;

    /// Posts by `user` under one origin, revisions included.
    async fn posts_with_revisions(&self, user: &str, origin: &str)
        -> Result<Vec<Post>, StoreError>;
}

/// The upload metadata store (a separate tabular database).
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn icons_by_uploader(&self, user: &str) -> Result<Vec<IconUpload>, StoreError>;

    async fn attachments_by_uploader(&self, user: &str)
        -> Result<Vec<AttachmentUpload>, StoreError>;
}

/// Object storage for finished archives.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file under `key`. Re-uploading the same key replaces
    /// the object; no overwrite protection is assumed.
    async fn put_file(&self, key: &str, path: &Path) -> Result<(), StoreError>;
}
