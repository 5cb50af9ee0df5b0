//! Denormalized user snapshot written to `user.json`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One archive's `user.json`: profile, settings, relationship list, and
/// network log combined into a single document.
///
/// Secret fields (password hash, session tokens) never reach this struct;
/// the content store excludes them at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    pub id: Uuid,
    pub username: String,
    pub pfp_data: i64,
    pub avatar: String,
    pub avatar_color: String,
    pub quote: String,
    pub flags: i64,
    pub permissions: i64,
    pub ban: BanState,
    pub created: i64,
    pub last_seen: Option<i64>,
    pub delete_after: Option<i64>,
    /// Free-form per-user settings document.
    pub settings: serde_json::Value,
    pub relationships: Vec<Relationship>,
    pub netlogs: Vec<Netlog>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanState {
    pub state: String,
    pub restrictions: i64,
    pub expires: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub state: i32,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipId {
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlog {
    pub id: NetlogId,
    pub last_used: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetlogId {
    pub ip: String,
}
