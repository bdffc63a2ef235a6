//! Home page — every registered user.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{UserListResponse, UserSummary};

/// `GET /` — list all users.
pub async fn index_handler(State(state): State<AppState>) -> AppResult<Json<UserListResponse>> {
    let users = quill_core::auth::queries::list_users(&state.pool)
        .await?
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            email: u.email,
        })
        .collect();
    Ok(Json(UserListResponse { users }))
}
