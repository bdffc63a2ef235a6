//! Notes-by-user request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use quill_core::models::note::NoteForm;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::SessionIdentity;
use crate::models::NotesPage;
use crate::services::notes::notes_page;

/// Path of both notes routes; the filter segment is optional.
#[derive(Debug, Deserialize)]
pub struct NotesPath {
    pub user_email: String,
    pub privacy_filter: Option<String>,
}

/// `GET /notes/{user_email}[/{privacy_filter}]` — a user's notes.
pub async fn list_notes_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionIdentity>,
    Path(path): Path<NotesPath>,
) -> AppResult<(StatusCode, Json<NotesPage>)> {
    let (status, page) = notes_page(
        &state.pool,
        session.0.as_ref(),
        &path.user_email,
        path.privacy_filter.as_deref(),
        None,
    )
    .await?;
    Ok((status, Json(page)))
}

/// `POST /notes/{user_email}[/{privacy_filter}]` — add a note (owner only)
/// and return the page.
pub async fn create_note_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionIdentity>,
    Path(path): Path<NotesPath>,
    body: Result<Json<NoteForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<NotesPage>)> {
    let (status, page) = notes_page(
        &state.pool,
        session.0.as_ref(),
        &path.user_email,
        path.privacy_filter.as_deref(),
        Some(body.map(|Json(form)| form)),
    )
    .await?;
    Ok((status, Json(page)))
}
