//! Authentication and authorization logic.
//!
//! Provides password hashing, JWT management, and the user/role queries
//! used by `quill_api`.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Canonical form of an email address: trimmed and lowercased.
///
/// Every stored email and every lookup goes through this, so
/// `A@x.com` and `a@x.com` name the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
