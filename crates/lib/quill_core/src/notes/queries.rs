//! Note database queries.
//!
//! No statement here ever changes `note.user_id`.

use sqlx::SqlitePool;

use super::NoteError;
use crate::models::note::{Note, NoteInput, Visibility};

type NoteRow = (i64, String, bool, i64);

fn note_from_row((id, note_name, is_private, user_id): NoteRow) -> Note {
    Note {
        id,
        note_name,
        is_private,
        user_id,
    }
}

/// Fetch a note by ID.
pub async fn find_note(pool: &SqlitePool, note_id: i64) -> Result<Option<Note>, NoteError> {
    let row = sqlx::query_as::<_, NoteRow>(
        "SELECT id, note_name, is_private, user_id FROM note WHERE id = ?",
    )
    .bind(note_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(note_from_row))
}

/// List a user's notes with the given visibility, oldest first.
pub async fn list_notes_for_user(
    pool: &SqlitePool,
    user_id: i64,
    visibility: Visibility,
) -> Result<Vec<Note>, NoteError> {
    let rows = sqlx::query_as::<_, NoteRow>(
        "SELECT id, note_name, is_private, user_id FROM note \
         WHERE user_id = ? AND is_private = ? ORDER BY id",
    )
    .bind(user_id)
    .bind(visibility.is_private())
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(note_from_row).collect())
}

/// Create a note owned by `owner_id`.
pub async fn create_note(
    pool: &SqlitePool,
    owner_id: i64,
    input: &NoteInput,
) -> Result<Note, NoteError> {
    let result = sqlx::query("INSERT INTO note (note_name, is_private, user_id) VALUES (?, ?, ?)")
        .bind(&input.note_name)
        .bind(input.is_private)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(Note {
        id: result.last_insert_rowid(),
        note_name: input.note_name.clone(),
        is_private: input.is_private,
        user_id: owner_id,
    })
}

/// Update a note's name and visibility.
pub async fn update_note(
    pool: &SqlitePool,
    note_id: i64,
    input: &NoteInput,
) -> Result<Note, NoteError> {
    let result = sqlx::query("UPDATE note SET note_name = ?, is_private = ? WHERE id = ?")
        .bind(&input.note_name)
        .bind(input.is_private)
        .bind(note_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(NoteError::NotFound(format!("note {note_id}")));
    }
    find_note(pool, note_id)
        .await?
        .ok_or_else(|| NoteError::NotFound(format!("note {note_id}")))
}
