//! Request handlers.

pub mod auth;
pub mod edit_note;
pub mod health;
pub mod index;
pub mod notes;
