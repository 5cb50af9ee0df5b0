//! Production collaborator implementations.

pub mod control_bus;
pub mod object_storage;

pub use control_bus::PgControlBus;
pub use object_storage::S3ObjectStore;
