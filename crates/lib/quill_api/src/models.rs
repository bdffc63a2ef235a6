//! Request and response bodies.
//!
//! Field names are camelCase on the wire.

use quill_core::models::note::{FieldError, Note, NoteForm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub version: String,
    #[serde(rename = "dbConnected")]
    pub db_connected: bool,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    pub id: i64,
    pub note_name: String,
    pub is_private: bool,
}

impl From<Note> for NoteItem {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            note_name: note.note_name,
            is_private: note.is_private,
        }
    }
}

/// Note form state as redisplayed to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFormView {
    pub note_name: String,
    pub is_private: bool,
    pub errors: Vec<FieldError>,
}

impl NoteFormView {
    pub fn with_errors(form: NoteForm, errors: Vec<FieldError>) -> Self {
        Self {
            note_name: form.note_name,
            is_private: form.is_private,
            errors,
        }
    }
}

impl From<&Note> for NoteFormView {
    fn from(note: &Note) -> Self {
        Self {
            note_name: note.note_name.clone(),
            is_private: note.is_private,
            errors: Vec::new(),
        }
    }
}

/// One-shot notification shown after a successful change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self {
            category: "success".into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub user_email: String,
    pub privacy_filter: String,
    pub is_private: bool,
    pub notes: Vec<NoteItem>,
    /// Present only when the requester owns the page.
    pub form: Option<NoteFormView>,
    pub flash: Option<Flash>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditNotePage {
    pub note_id: i64,
    pub form: NoteFormView,
    pub flash: Option<Flash>,
}
