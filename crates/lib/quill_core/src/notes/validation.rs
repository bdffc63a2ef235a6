//! Note form validation.

use crate::models::note::{FieldError, NOTE_NAME_MAX_LEN, NoteForm, NoteInput};

/// Form field carrying the note name.
pub const NOTE_NAME_FIELD: &str = "noteName";

/// Validate a submitted note form.
///
/// Returns the trimmed payload, or every field error found.
pub fn validate_note_form(form: &NoteForm) -> Result<NoteInput, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = form.note_name.trim();

    if name.is_empty() {
        errors.push(FieldError::new(NOTE_NAME_FIELD, "This field is required."));
    } else if name.chars().count() > NOTE_NAME_MAX_LEN {
        errors.push(FieldError::new(
            NOTE_NAME_FIELD,
            format!("Field cannot be longer than {NOTE_NAME_MAX_LEN} characters."),
        ));
    }

    if errors.is_empty() {
        Ok(NoteInput {
            note_name: name.to_string(),
            is_private: form.is_private,
        })
    } else {
        Err(errors)
    }
}
