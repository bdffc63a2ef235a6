//! Notes pages — listing, creation and editing with ownership checks.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use quill_core::auth::queries::find_user_by_email;
use quill_core::models::auth::Identity;
use quill_core::models::note::{FieldError, NoteForm};
use quill_core::notes::access::{DEFAULT_PRIVACY_FILTER, authorize_edit, authorize_listing};
use quill_core::notes::queries;
use quill_core::notes::validation::validate_note_form;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{EditNotePage, Flash, NoteFormView, NoteItem, NotesPage};

/// A submitted request body: a note form, or why it could not be read.
pub type Submission = Result<NoteForm, JsonRejection>;

/// Field name used for errors about the body as a whole.
const BODY_FIELD: &str = "body";

fn body_error(rejection: &JsonRejection) -> Vec<FieldError> {
    vec![FieldError::new(BODY_FIELD, rejection.body_text())]
}

/// Build the notes page for `user_email`, creating a note first when the
/// owner submitted a valid form.
pub async fn notes_page(
    pool: &SqlitePool,
    requester: Option<&Identity>,
    user_email: &str,
    privacy_filter: Option<&str>,
    submission: Option<Submission>,
) -> AppResult<(StatusCode, NotesPage)> {
    let target = find_user_by_email(pool, user_email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user {user_email}")))?
        .user;

    let filter = privacy_filter.unwrap_or(DEFAULT_PRIVACY_FILTER);
    let (visibility, access) = authorize_listing(&target, filter, requester)?;

    let mut status = StatusCode::OK;
    let mut flash = None;
    let mut form = access.can_create().then(NoteFormView::default);

    match submission {
        None => {}
        Some(_) if !access.can_create() => {
            debug!(user_email, "ignoring note submission from non-owner");
        }
        Some(Err(rejection)) => {
            status = StatusCode::UNPROCESSABLE_ENTITY;
            form = Some(NoteFormView::with_errors(
                NoteForm::default(),
                body_error(&rejection),
            ));
        }
        Some(Ok(submitted)) => match validate_note_form(&submitted) {
            Ok(input) => {
                let note = queries::create_note(pool, target.id, &input).await?;
                info!(note_id = note.id, user_id = target.id, "note created");
                form = Some(NoteFormView {
                    note_name: String::new(),
                    is_private: input.is_private,
                    errors: Vec::new(),
                });
                flash = Some(Flash::success("Note was added successfully"));
            }
            Err(errors) => {
                status = StatusCode::UNPROCESSABLE_ENTITY;
                form = Some(NoteFormView::with_errors(submitted, errors));
            }
        },
    }

    let notes = queries::list_notes_for_user(pool, target.id, visibility)
        .await?
        .into_iter()
        .map(NoteItem::from)
        .collect();

    Ok((
        status,
        NotesPage {
            user_email: target.email,
            privacy_filter: visibility.to_string(),
            is_private: visibility.is_private(),
            notes,
            form,
            flash,
        },
    ))
}

/// Build the edit page for a note, applying the submitted form when valid.
///
/// Ownership is checked before the submission is looked at.
pub async fn edit_page(
    pool: &SqlitePool,
    requester: &Identity,
    raw_note_id: &str,
    submission: Option<Submission>,
) -> AppResult<(StatusCode, EditNotePage)> {
    let not_found = || AppError::NotFound(format!("no note {raw_note_id}"));

    let note_id: i64 = raw_note_id.parse().map_err(|_| not_found())?;
    let note = queries::find_note(pool, note_id)
        .await?
        .ok_or_else(not_found)?;
    authorize_edit(&note, requester)?;

    let (status, form, flash) = match submission {
        None => (StatusCode::OK, NoteFormView::from(&note), None),
        Some(Err(rejection)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            NoteFormView {
                errors: body_error(&rejection),
                ..NoteFormView::from(&note)
            },
            None,
        ),
        Some(Ok(submitted)) => match validate_note_form(&submitted) {
            Ok(input) => {
                let updated = queries::update_note(pool, note.id, &input).await?;
                info!(note_id = updated.id, user_id = requester.user_id, "note updated");
                (
                    StatusCode::OK,
                    NoteFormView::from(&updated),
                    Some(Flash::success("Note was changed successfully")),
                )
            }
            Err(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                NoteFormView::with_errors(submitted, errors),
                None,
            ),
        },
    };

    Ok((
        status,
        EditNotePage {
            note_id: note.id,
            form,
            flash,
        },
    ))
}
