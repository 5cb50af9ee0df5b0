//! Domain models for the data export worker.

pub mod chat;
pub mod export_job;
pub mod post;
pub mod report;
pub mod upload;
pub mod user_export;

pub use chat::Chat;
pub use export_job::{epoch_now, ExportJob, ExportJobStatus, PendingExport};
pub use post::{Post, PostRevision};
pub use report::{Report, ReporterEntry};
pub use upload::{AttachmentUpload, IconUpload};
pub use user_export::{BanState, Netlog, NetlogId, Relationship, RelationshipId, UserExport};
