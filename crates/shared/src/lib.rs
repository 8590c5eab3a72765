//! Shared utilities and common types for the Role Console backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic for role and selection payloads

pub mod validation;
