//! Upload metadata rows from the uploads store.

use serde::{Deserialize, Serialize};

/// Icon upload metadata, filtered by uploader identity. The uploader
/// column itself is the query filter and is not exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconUpload {
    pub id: String,
    pub hash: String,
    pub mime: String,
    pub size: i64,
    pub width: i32,
    pub height: i32,
    /// Epoch seconds.
    pub uploaded_at: i64,
    /// Back-reference to whatever currently uses this icon.
    pub used_by: String,
}

/// Attachment upload metadata. Same shape as [`IconUpload`] plus the
/// original filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentUpload {
    pub id: String,
    pub hash: String,
    pub mime: String,
    pub filename: String,
    pub size: i64,
    pub width: i32,
    pub height: i32,
    pub uploaded_at: i64,
    pub used_by: String,
}
