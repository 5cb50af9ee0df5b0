//! Post and revision entities.

use sqlx::FromRow;

/// Post row. Nullable columns stay `Option` here and render as empty CSV
/// cells downstream.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: String,
    pub origin: String,
    pub content: String,
    pub unfiltered_content: Option<String>,
    pub timestamp: i64,
    pub edited_at: Option<i64>,
    pub deleted: bool,
    pub mod_deleted: bool,
    pub deleted_at: Option<i64>,
}

/// Edit revision row, joined to its post by id.
#[derive(Debug, Clone, FromRow)]
pub struct PostRevisionRow {
    pub id: String,
    pub post_id: String,
    pub old_content: String,
    pub new_content: String,
    pub time: i64,
}
