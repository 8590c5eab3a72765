//! Upstream workforce-backend gateway.
//!
//! This crate is the data-access seam of the Role Console: a typed client
//! for the workforce backend's role-permission endpoints, plus the
//! partial-failure-tolerant loader that assembles one role's editor
//! snapshot from the independent upstream feeds.

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod loader;
pub mod metrics;

pub use client::{HttpWorkforceBackend, WorkforceBackend};
pub use config::UpstreamConfig;
pub use error::GatewayError;
pub use loader::load_role_editor_state;
