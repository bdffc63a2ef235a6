#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use quill_api::{AppState, config::ApiConfig};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "correct horse battery";

/// Router over a fresh, migrated in-memory database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl Reply {
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Names of the notes in a notes page, in order.
    pub fn note_names(&self) -> Vec<String> {
        self.json["notes"]
            .as_array()
            .expect("notes array")
            .iter()
            .map(|n| n["noteName"].as_str().expect("noteName").to_string())
            .collect()
    }
}

/// How a request authenticates.
#[derive(Clone, Copy)]
pub enum As<'a> {
    Anonymous,
    Bearer(&'a str),
    Cookie(&'a str),
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = quill_core::db::connect_in_memory()
            .await
            .expect("in-memory pool");
        quill_api::migrate(&pool).await.expect("migrate");

        let state = AppState {
            pool: pool.clone(),
            config: ApiConfig {
                bind_addr: "127.0.0.1:0".into(),
                database_url: "sqlite::memory:".into(),
                jwt_secret: JWT_SECRET.into(),
                secure_cookies: false,
            },
        };

        Self {
            router: quill_api::router(state),
            pool,
        }
    }

    /// Register an account directly through the service, returning its token.
    pub async fn register(&self, email: &str) -> String {
        quill_api::services::auth::register(&self.pool, email, PASSWORD, JWT_SECRET.as_bytes())
            .await
            .expect("register")
            .access_token
    }

    pub async fn send(&self, method: Method, uri: &str, auth: As<'_>, body: Option<&str>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        builder = match auth {
            As::Anonymous => builder,
            As::Bearer(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            As::Cookie(token) => builder.header(COOKIE, format!("quill_session={token}")),
        };
        let req = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let resp = self.router.clone().oneshot(req).await.expect("request");
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Reply {
            status,
            headers,
            json,
        }
    }

    pub async fn get(&self, uri: &str, auth: As<'_>) -> Reply {
        self.send(Method::GET, uri, auth, None).await
    }

    pub async fn post(&self, uri: &str, auth: As<'_>, body: &str) -> Reply {
        self.send(Method::POST, uri, auth, Some(body)).await
    }

    pub async fn note_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM note")
            .fetch_one(&self.pool)
            .await
            .expect("count notes")
    }

    pub async fn note_row(&self, id: i64) -> (String, bool, i64) {
        sqlx::query_as::<_, (String, bool, i64)>(
            "SELECT note_name, is_private, user_id FROM note WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .expect("note row")
    }
}
