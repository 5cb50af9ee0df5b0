//! Safety report entities.

use sqlx::FromRow;

/// Report head row.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: String,
    pub kind: String,
    pub content_id: String,
    pub status: String,
}

/// One reporter's sub-record. Rows keep insertion order via the serial
/// primary key so "first match wins" is stable.
#[derive(Debug, Clone, FromRow)]
pub struct ReportEntryRow {
    pub report_id: String,
    pub reporter: String,
    pub ip: String,
    pub reason: String,
    pub comment: String,
    pub time: i64,
}
