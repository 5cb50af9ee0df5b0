//! Persistence layer for the data export worker.
//!
//! This crate contains:
//! - Database connection management (main store and uploads store)
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain collaborator traits

pub mod db;
pub mod entities;
pub mod repositories;
