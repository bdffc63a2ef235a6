//! Route paths.

pub const GET_INDEX: &str = "/";
pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_AUTH_REGISTER: &str = "/auth/register";
pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const GET_AUTH_ME: &str = "/auth/me";

pub const NOTES: &str = "/notes/{user_email}";
pub const NOTES_FILTERED: &str = "/notes/{user_email}/{privacy_filter}";
pub const EDIT_NOTE: &str = "/edit_note/{note_id}";
