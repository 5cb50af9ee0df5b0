//! Chat entities.

use sqlx::FromRow;

/// Chat row; `members` is a TEXT[] column.
#[derive(Debug, Clone, FromRow)]
pub struct ChatRow {
    pub id: String,
    pub kind: i32,
    pub nickname: String,
    pub icon: String,
    pub icon_color: String,
    pub owner: String,
    pub members: Vec<String>,
    pub created: i64,
    pub last_active: i64,
    pub deleted: bool,
    pub allow_pinning: bool,
}
