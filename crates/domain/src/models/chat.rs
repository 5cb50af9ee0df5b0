//! Chat snapshot, exported verbatim as one JSON file per chat.

use serde::{Deserialize, Serialize};

/// A chat the requesting user is a member of. Membership is the sole
/// inclusion criterion; the user need not own the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    #[serde(rename = "type")]
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
