//! Collaborator contracts for the export worker.
//!
//! Every external system the pipeline touches (job store, content store,
//! uploads store, object storage, coordination bus) is reached through a
//! trait defined here, so the worker can take in-memory fakes in tests.

pub mod bus;
pub mod inbox;
pub mod stores;

pub use bus::{BusError, ControlBus, ControlSignal, ControlStream, MemoryControlBus};
pub use inbox::UserAlert;
pub use stores::{ContentStore, ExportJobStore, ObjectStore, StoreError, UploadStore};
