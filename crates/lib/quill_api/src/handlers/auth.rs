//! Authentication request handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use quill_core::auth::jwt::ACCESS_TOKEN_EXPIRY_SECS;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AuthUser, LoginRequest, LogoutResponse, RegisterRequest, TokenResponse};
use crate::services::auth;
use crate::services::cookies::{clear_session_cookie, session_cookie};

/// `POST /auth/register` — create a new account and start a session.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let Json(body) = body?;
    let resp = auth::register(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(session_cookie(
        &resp.access_token,
        ACCESS_TOKEN_EXPIRY_SECS,
        state.config.secure_cookies,
    ));
    Ok((jar, Json(resp)))
}

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let Json(body) = body?;
    let resp = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(session_cookie(
        &resp.access_token,
        ACCESS_TOKEN_EXPIRY_SECS,
        state.config.secure_cookies,
    ));
    Ok((jar, Json(resp)))
}

/// `POST /auth/logout` — drop the session cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.add(clear_session_cookie(state.config.secure_cookies));
    (jar, Json(LogoutResponse { success: true }))
}

/// `GET /auth/me` — the authenticated account.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<AuthUser>> {
    Ok(Json(auth::current_user(&state.pool, &user.0).await?))
}
