//! Upload metadata entities (uploads database).

use sqlx::FromRow;

/// Icon upload row. The uploader column is the query filter and is not
/// part of the export.
#[derive(Debug, Clone, FromRow)]
pub struct IconUploadRow {
    pub id: String,
    pub hash: String,
    pub mime: String,
    pub size: i64,
    pub width: i32,
    pub height: i32,
    pub uploaded_at: i64,
    pub used_by: String,
}

/// Attachment upload row; adds the original filename.
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentUploadRow {
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
