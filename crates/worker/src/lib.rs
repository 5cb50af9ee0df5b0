//! Data export worker.
//!
//! A background process that fulfills "export my data" requests: it gathers
//! a user's records from the main store and the uploads store, packages them
//! into one zip archive, uploads the archive to object storage, and drives
//! the job to a terminal status with a user notification.
//!
//! Exposed as a library so integration tests can wire the pipeline against
//! in-memory collaborators.

pub mod archive;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod pipeline;
pub mod poller;
pub mod services;
