//! Post snapshot with its recorded edit revisions.

use serde::{Deserialize, Serialize};

/// A post authored by the requesting user, carrying every recorded edit
/// revision. Posts are grouped by `origin` into one CSV table per origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Logical origin/context identifier (home feed, a group chat, ...).
    /// Grouping key for the `posts/<origin>.csv` archive entries.
    pub origin: String,
    pub content: String,
    pub unfiltered_content: Option<String>,
    /// Epoch seconds.
    pub timestamp: i64,
    pub revisions: Vec<PostRevision>,
    pub edited_at: Option<i64>,
    pub deleted: bool,
    pub mod_deleted: bool,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRevision {
    pub id: String,
    pub old_content: String,
    pub new_content: String,
    pub time: i64,
}

impl Post {
    /// Revision list serialized as a single JSON string, the form embedded
    /// into one CSV cell rather than exploded into columns.
    pub fn revisions_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.revisions)
    }
}
