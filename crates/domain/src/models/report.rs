//! Safety report snapshot.

use serde::{Deserialize, Serialize};

/// A content report in which the requesting user appears among the
/// reporters. The export only ever includes the requesting user's own
/// reporter entry, never the other reporters'.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content_id: String,
    pub status: String,
    pub entries: Vec<ReporterEntry>,
}

/// One reporter's sub-record within a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterEntry {
    pub user: String,
    pub ip: String,
    pub reason: String,
    pub comment: String,
    /// Epoch seconds.
    pub time: i64,
}

impl Report {
    /// The reporter entry belonging to `user`. First match wins when the
    /// same user reported the same content more than once.
    pub fn entry_for(&self, user: &str) -> Option<&ReporterEntry> {
        self.entries.iter().find(|entry| entry.user == user)
    }
}
