//! Domain layer for the Role Console backend.
//!
//! This crate contains:
//! - Permission catalog and entity-restriction models
//! - The pure selection/serialization services behind the role editor
//! - Domain error types

pub mod models;
pub mod services;
