//! Database entities (row mappings).

pub mod chat;
pub mod export_job;
pub mod post;
pub mod report;
pub mod upload;
pub mod user;

pub use chat::ChatRow;
pub use export_job::PendingExportRow;
pub use post::{PostRevisionRow, PostRow};
pub use report::{ReportEntryRow, ReportRow};
pub use upload::{AttachmentUploadRow, IconUploadRow};
pub use user::{NetlogRow, RelationshipRow, UserRow, UserSettingsRow};
