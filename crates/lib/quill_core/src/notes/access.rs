//! Access rules for reading and editing notes.
//!
//! These are pure decisions over already-loaded entities. Callers load the
//! target user or note first (unknown ones are `NotFound`), then ask here.

use super::NoteError;
use crate::models::auth::{Identity, User};
use crate::models::note::{Note, Visibility};

/// Privacy filter used when the request does not name one.
pub const DEFAULT_PRIVACY_FILTER: &str = "public";

/// How the requester may interact with a user's notes page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    /// The requester owns the page and may add notes.
    Owner,
    /// Anyone else: list only.
    ReadOnly,
}

impl PageAccess {
    pub fn can_create(self) -> bool {
        matches!(self, PageAccess::Owner)
    }
}

/// Decide which notes of `target` the requester may list.
///
/// A private listing by anyone but the owner is `Forbidden`. A filter other
/// than `public` or `private` is `NotFound`, which callers cannot tell apart
/// from an unknown user.
pub fn authorize_listing(
    target: &User,
    privacy_filter: &str,
    requester: Option<&Identity>,
) -> Result<(Visibility, PageAccess), NoteError> {
    let access = if requester.is_some_and(|id| id.is(target.id)) {
        PageAccess::Owner
    } else {
        PageAccess::ReadOnly
    };

    let visibility = match privacy_filter {
        "private" if access == PageAccess::ReadOnly => {
            return Err(NoteError::Forbidden(format!(
                "private notes of {} are visible to their owner only",
                target.email
            )));
        }
        "private" => Visibility::Private,
        "public" => Visibility::Public,
        other => {
            return Err(NoteError::NotFound(format!(
                "no notes page '{other}' for {}",
                target.email
            )));
        }
    };

    Ok((visibility, access))
}

/// Only the owner may view or change a note through the edit page.
pub fn authorize_edit(note: &Note, requester: &Identity) -> Result<(), NoteError> {
    if requester.is(note.user_id) {
        Ok(())
    } else {
        Err(NoteError::Forbidden(format!(
            "note {} belongs to another user",
            note.id
        )))
    }
}
