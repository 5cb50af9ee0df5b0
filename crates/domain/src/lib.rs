//! Domain layer for the data export worker.
//!
//! This crate contains:
//! - Record models for every export section (user, reports, chats, posts, uploads)
//! - The export job lifecycle
//! - Collaborator contracts (datastores, coordination bus, inbox payloads)

pub mod models;
pub mod services;
