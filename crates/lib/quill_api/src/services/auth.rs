//! Authentication service — registration, login and session resolution on
//! top of `quill_core::auth`.

use quill_core::auth::jwt::{ACCESS_TOKEN_EXPIRY_SECS, generate_access_token, verify_access_token};
use quill_core::auth::password::{hash_password, verify_password};
use quill_core::auth::{AuthError, normalize_email, queries};
use quill_core::models::auth::{ADMIN_ROLE, HasRoles, Identity, USER_ROLE, User};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, TokenResponse};

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LEN: usize = 8;

/// Minimal shape check: `local@domain`, both non-empty, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn auth_user(user: &User) -> AuthUser {
    AuthUser {
        id: user.id,
        email: user.email.clone(),
        roles: user.role_names(),
    }
}

/// Issue an access token for `user` and wrap it in a `TokenResponse`.
fn token_response(user: &User, jwt_secret: &[u8]) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user.id, &user.email, &user.role_names(), jwt_secret)?;
    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        user: auth_user(user),
    })
}

/// Register a new account. Every account gets the `user` role; the first
/// one also gets `admin`.
///
/// The insert, the first-user check and the role grants share one
/// transaction, so an account never exists without its roles and two
/// racing registrations for one email end in a single account.
pub async fn register(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let email = normalize_email(email);
    if !is_plausible_email(&email) {
        return Err(AuthError::ValidationError("Invalid email address".into()).into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::ValidationError(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .into());
    }

    let pw_hash = hash_password(password)?;

    let mut tx = pool.begin().await?;
    let user_id = queries::create_user(&mut *tx, &email, &pw_hash).await?;
    // The insert holds the write lock, so this count includes only settled accounts.
    let is_first_user = queries::user_count(&mut *tx).await? == 1;
    queries::grant_role(&mut *tx, user_id, USER_ROLE).await?;
    if is_first_user {
        queries::grant_role(&mut *tx, user_id, ADMIN_ROLE).await?;
    }
    tx.commit().await?;

    if is_first_user {
        info!(email = %email, "first user granted admin role");
    }

    let user = queries::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("user {user_id} vanished after insert")))?;

    info!(user_id, email = %email, "registered user");
    token_response(&user, jwt_secret)
}

/// Authenticate with email + password.
///
/// Unknown email, wrong password and inactive account all fail the same way.
pub async fn login(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let found = queries::find_user_by_email(pool, email)
        .await?
        .ok_or(AuthError::CredentialError)?;

    if !verify_password(password, &found.password_hash)? {
        return Err(AuthError::CredentialError.into());
    }
    if !found.user.active {
        warn!(user_id = found.user.id, "login attempt on inactive account");
        return Err(AuthError::CredentialError.into());
    }

    token_response(&found.user, jwt_secret)
}

/// Resolve a presented access token to a session identity.
///
/// Any token that does not name a live, active account resolves to
/// anonymous rather than an error.
pub async fn resolve_identity(
    pool: &SqlitePool,
    token: &str,
    jwt_secret: &[u8],
) -> AppResult<Option<Identity>> {
    let Some(claims) = verify_access_token(token, jwt_secret) else {
        debug!("rejected access token");
        return Ok(None);
    };
    let Some(user_id) = claims.user_id() else {
        return Ok(None);
    };

    match queries::get_user_by_id(pool, user_id).await? {
        Some(user) if user.active => Ok(Some(Identity::from(&user))),
        Some(_) => {
            warn!(user_id, "token presented for inactive account");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// The account behind an authenticated identity.
pub async fn current_user(pool: &SqlitePool, identity: &Identity) -> AppResult<AuthUser> {
    let user = queries::get_user_by_id(pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
    Ok(auth_user(&user))
}
