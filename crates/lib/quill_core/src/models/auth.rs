//! Identity domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! shapes in `quill_api::models` (which carry camelCase renames).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the role granted to the first registered account.
pub const ADMIN_ROLE: &str = "admin";

/// Name of the role granted to every registered account.
pub const USER_ROLE: &str = "user";

/// Authorization role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Domain user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub active: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub roles: Vec<Role>,
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// Anything that carries a set of roles.
///
/// The auth service reads roles only through this trait.
pub trait HasRoles {
    fn roles(&self) -> &[Role];

    fn has_role(&self, name: &str) -> bool {
        self.roles().iter().any(|r| r.name == name)
    }

    fn role_names(&self) -> Vec<String> {
        self.roles().iter().map(|r| r.name.clone()).collect()
    }
}

impl HasRoles for User {
    fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// The authenticated identity attached to a request.
///
/// Two identities refer to the same account iff their `user_id`s match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

impl Identity {
    /// Whether this identity is the account `user_id`.
    pub fn is(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// User email.
    pub email: String,
    /// User roles (e.g. `["user", "admin"]`).
    pub roles: Vec<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

impl TokenClaims {
    /// Numeric user ID from the `sub` claim.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
