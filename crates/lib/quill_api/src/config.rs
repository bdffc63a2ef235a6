//! API server configuration.

use quill_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Mark the session cookie `Secure` (HTTPS only).
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                             |
    /// |--------------------|-------------------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:3100`                    |
    /// | `DATABASE_URL`     | `sqlite://quill.db`                 |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file |
    /// | `SECURE_COOKIES`   | `false`                             |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://quill.db".into()),
            jwt_secret: resolve_jwt_secret(),
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
