//! Edit-note request handlers. Both routes sit behind `require_auth`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use quill_core::models::note::NoteForm;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::EditNotePage;
use crate::services::notes::edit_page;

/// `GET /edit_note/{note_id}` — the note's current values.
pub async fn show_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
) -> AppResult<(StatusCode, Json<EditNotePage>)> {
    let (status, page) = edit_page(&state.pool, &user.0, &note_id, None).await?;
    Ok((status, Json(page)))
}

/// `POST /edit_note/{note_id}` — change a note's name and visibility.
pub async fn update_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
    body: Result<Json<NoteForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<EditNotePage>)> {
    let submission = Some(body.map(|Json(form)| form));
    let (status, page) = edit_page(&state.pool, &user.0, &note_id, submission).await?;
    Ok((status, Json(page)))
}
