//! Session middleware — resolves the caller's identity from a bearer token
//! or the session cookie, and guards routes that need one.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use quill_core::models::auth::Identity;

use crate::AppState;
use crate::error::AppError;
use crate::services::auth::resolve_identity;
use crate::services::cookies::SESSION_COOKIE;

/// The session identity of the current request; `None` when anonymous.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity(pub Option<Identity>);

/// Inserted by [`require_auth`] once an identity is known to be present.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Pick the access token: `Authorization: Bearer` wins over the cookie.
fn presented_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.trim().to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Axum middleware: resolves the session identity (possibly anonymous) and
/// injects `SessionIdentity` into request extensions.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match presented_token(request.headers()) {
        Some(token) => {
            resolve_identity(&state.pool, &token, state.config.jwt_secret.as_bytes()).await?
        }
        None => None,
    };

    request.extensions_mut().insert(SessionIdentity(identity));
    Ok(next.run(request).await)
}

/// Axum middleware: rejects anonymous requests with 401 and injects
/// `AuthenticatedUser` for the handler.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, AppError> {
    let identity = request
        .extensions()
        .get::<SessionIdentity>()
        .and_then(|s| s.0.clone())
        .ok_or_else(|| AppError::Unauthorized("Login required".into()))?;

    request.extensions_mut().insert(AuthenticatedUser(identity));
    Ok(next.run(request).await)
}
