//! User profile entities.
//!
//! The `users` table also holds the password hash and session token columns;
//! no query in this crate ever selects them.

use sqlx::FromRow;
use uuid::Uuid;

/// Profile row, secrets excluded.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub uuid: Uuid,
    pub username: String,
    pub pfp_data: i64,
    pub avatar: String,
    pub avatar_color: String,
    pub quote: String,
    pub flags: i64,
    pub permissions: i64,
    pub ban_state: String,
    pub ban_restrictions: i64,
    pub ban_expires: i64,
    pub ban_reason: String,
    pub created: i64,
    pub last_seen: Option<i64>,
    pub delete_after: Option<i64>,
}

/// Free-form settings document, one row per user.
#[derive(Debug, Clone, FromRow)]
pub struct UserSettingsRow {
    pub settings: serde_json::Value,
}

/// Outgoing relationship row.
#[derive(Debug, Clone, FromRow)]
pub struct RelationshipRow {
    pub to_user: String,
    pub state: i32,
    pub updated_at: i64,
}

/// Network/session log row.
#[derive(Debug, Clone, FromRow)]
pub struct NetlogRow {
    pub ip: String,
    pub last_used: i64,
}
