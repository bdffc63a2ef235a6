//! Notes: storage, access rules and form validation.

pub mod access;
pub mod queries;
pub mod validation;

use thiserror::Error;

/// Note access and storage errors.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
