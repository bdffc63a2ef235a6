//! # quill_core
//!
//! Core domain logic for Quill.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod notes;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
