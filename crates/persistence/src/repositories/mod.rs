//! Repository implementations of the domain collaborator traits.

pub mod content;
pub mod export_job;
pub mod upload;

pub use content::ContentRepository;
pub use export_job::ExportJobRepository;
pub use upload::UploadRepository;
