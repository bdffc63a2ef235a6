//! Note domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a note name, in characters.
pub const NOTE_NAME_MAX_LEN: usize = 140;

/// A short named note owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub note_name: String,
    pub is_private: bool,
    /// Owner. Set at creation and never changed.
    pub user_id: i64,
}

/// Which half of a user's notes a request is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl From<bool> for Visibility {
    fn from(is_private: bool) -> Self {
        if is_private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw note form submission, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    #[serde(default)]
    pub note_name: String,
    #[serde(default)]
    pub is_private: bool,
}

/// A validated note payload, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub note_name: String,
    pub is_private: bool,
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
