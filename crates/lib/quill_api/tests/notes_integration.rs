//! Notes pages end to end: listing, visibility, creation and editing.

mod common;

use axum::http::StatusCode;
use common::{As, TestApp};

const A: &str = "a@x.com";
const B: &str = "b@x.com";

/// Create a note as `token` through the notes page, returning its id.
async fn add_note(app: &TestApp, email: &str, token: &str, name: &str, is_private: bool) -> i64 {
    let body = serde_json::json!({ "noteName": name, "isPrivate": is_private }).to_string();
    let reply = app
        .post(&format!("/notes/{email}"), As::Bearer(token), &body)
        .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.json);
    sqlx::query_scalar::<_, i64>("SELECT MAX(id) FROM note")
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn index_lists_all_users_in_order() {
    let app = TestApp::new().await;
    app.register(A).await;
    app.register(B).await;

    let reply = app.get("/", As::Anonymous).await;
    assert_eq!(reply.status, StatusCode::OK);
    let emails: Vec<&str> = reply.json["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec![A, B]);
}

#[tokio::test]
async fn public_note_is_visible_to_anonymous() {
    let app = TestApp::new().await;
    let a = app.register(A).await;

    let body = r#"{"noteName": "Groceries", "isPrivate": false}"#;
    let created = app.post("/notes/a@x.com", As::Bearer(&a), body).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json["flash"]["category"], "success");
    assert_eq!(created.json["flash"]["message"], "Note was added successfully");
    assert_eq!(created.json["form"]["noteName"], "");
    assert_eq!(created.note_names(), vec!["Groceries"]);

    let reply = app.get("/notes/a@x.com", As::Anonymous).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.note_names(), vec!["Groceries"]);
    assert_eq!(reply.json["userEmail"], A);
    assert_eq!(reply.json["privacyFilter"], "public");
    assert_eq!(reply.json["isPrivate"], false);
    assert!(reply.json["form"].is_null());
}

#[tokio::test]
async fn private_notes_are_owner_only() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let b = app.register(B).await;

    add_note(&app, A, &a, "Groceries", false).await;
    add_note(&app, A, &a, "Secret", true).await;

    for who in [As::Anonymous, As::Bearer(&b), As::Cookie(&b)] {
        let reply = app.get("/notes/a@x.com/private", who).await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN);
        assert_eq!(reply.json["error"], "forbidden");
    }

    let own = app.get("/notes/a@x.com/private", As::Bearer(&a)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.note_names(), vec!["Secret"]);
    assert_eq!(own.json["isPrivate"], true);

    // The private note never leaks into the public listing.
    for who in [As::Anonymous, As::Bearer(&b), As::Bearer(&a)] {
        let reply = app.get("/notes/a@x.com/public", who).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.note_names(), vec!["Groceries"]);
    }
}

#[tokio::test]
async fn session_cookie_identifies_owner() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    add_note(&app, A, &a, "Secret", true).await;

    let reply = app.get("/notes/a@x.com/private", As::Cookie(&a)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.note_names(), vec!["Secret"]);
}

#[tokio::test]
async fn unknown_filter_or_user_is_not_found() {
    let app = TestApp::new().await;
    let a = app.register(A).await;

    for who in [As::Anonymous, As::Bearer(&a)] {
        for uri in [
            "/notes/a@x.com/invalid_value",
            "/notes/a@x.com/PUBLIC",
            "/notes/nobody@x.com",
            "/notes/nobody@x.com/private",
        ] {
            let reply = app.get(uri, who).await;
            assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(reply.json["error"], "not_found");
        }
    }
}

#[tokio::test]
async fn form_is_offered_to_owner_only() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let b = app.register(B).await;

    let own = app.get("/notes/a@x.com", As::Bearer(&a)).await;
    assert!(own.json["form"].is_object());
    assert_eq!(own.json["form"]["errors"], serde_json::json!([]));

    let other = app.get("/notes/a@x.com", As::Bearer(&b)).await;
    assert!(other.json["form"].is_null());
}

#[tokio::test]
async fn submissions_from_others_are_ignored() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let b = app.register(B).await;
    add_note(&app, A, &a, "Groceries", false).await;

    let body = r#"{"noteName": "Graffiti"}"#;
    for who in [As::Anonymous, As::Bearer(&b)] {
        let reply = app.post("/notes/a@x.com", who, body).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.note_names(), vec!["Groceries"]);
        assert!(reply.json["flash"].is_null());
    }
    assert_eq!(app.note_count().await, 1);
}

#[tokio::test]
async fn private_note_created_from_public_page_is_not_listed_there() {
    let app = TestApp::new().await;
    let a = app.register(A).await;

    let body = r#"{"noteName": "Diary", "isPrivate": true}"#;
    let reply = app.post("/notes/a@x.com", As::Bearer(&a), body).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.note_names().is_empty());
    assert_eq!(reply.json["form"]["isPrivate"], true);

    let private = app.get("/notes/a@x.com/private", As::Bearer(&a)).await;
    assert_eq!(private.note_names(), vec!["Diary"]);
}

#[tokio::test]
async fn invalid_submission_is_reported_inline() {
    let app = TestApp::new().await;
    let a = app.register(A).await;

    let reply = app
        .post("/notes/a@x.com", As::Bearer(&a), r#"{"noteName": "   ", "isPrivate": true}"#)
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.json["form"]["errors"][0]["field"], "noteName");
    assert_eq!(
        reply.json["form"]["errors"][0]["message"],
        "This field is required."
    );
    assert_eq!(reply.json["form"]["isPrivate"], true);
    assert!(reply.json["flash"].is_null());

    let too_long = serde_json::json!({ "noteName": "x".repeat(141) }).to_string();
    let reply = app.post("/notes/a@x.com", As::Bearer(&a), &too_long).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = app.post("/notes/a@x.com", As::Bearer(&a), "not json").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.json["form"]["errors"][0]["field"], "body");

    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn edit_requires_login() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let id = add_note(&app, A, &a, "Groceries", false).await;
    let uri = format!("/edit_note/{id}");

    let reply = app.get(&uri, As::Anonymous).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = app.post(&uri, As::Anonymous, r#"{"noteName": "x"}"#).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = app.get(&uri, As::Bearer("garbage")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn edit_by_non_owner_is_forbidden_for_every_method() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let b = app.register(B).await;
    let id = add_note(&app, A, &a, "Groceries", false).await;
    let uri = format!("/edit_note/{id}");

    let reply = app.get(&uri, As::Bearer(&b)).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    for body in [r#"{"noteName": "Hijacked", "isPrivate": true}"#, "", "not json"] {
        let reply = app.post(&uri, As::Bearer(&b), body).await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN, "body {body:?}");
    }

    let (name, is_private, _) = app.note_row(id).await;
    assert_eq!(name, "Groceries");
    assert!(!is_private);
}

#[tokio::test]
async fn edit_of_unknown_note_is_not_found() {
    let app = TestApp::new().await;
    let a = app.register(A).await;

    for uri in ["/edit_note/999", "/edit_note/abc", "/edit_note/-1"] {
        let reply = app.get(uri, As::Bearer(&a)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn owner_edits_name_and_visibility() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let id = add_note(&app, A, &a, "Groceries", false).await;
    let uri = format!("/edit_note/{id}");

    let shown = app.get(&uri, As::Bearer(&a)).await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.json["noteId"], id);
    assert_eq!(shown.json["form"]["noteName"], "Groceries");
    assert_eq!(shown.json["form"]["isPrivate"], false);
    assert!(shown.json["flash"].is_null());

    let body = r#"{"noteName": "Shopping list", "isPrivate": true}"#;
    let saved = app.post(&uri, As::Bearer(&a), body).await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.json["flash"]["message"], "Note was changed successfully");
    assert_eq!(saved.json["form"]["noteName"], "Shopping list");
    assert_eq!(saved.json["form"]["isPrivate"], true);

    let (name, is_private, owner) = app.note_row(id).await;
    assert_eq!(name, "Shopping list");
    assert!(is_private);
    let a_id = sqlx::query_scalar::<_, i64>("SELECT id FROM user WHERE email = ?")
        .bind(A)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(owner, a_id);

    let public = app.get("/notes/a@x.com", As::Anonymous).await;
    assert!(public.note_names().is_empty());
}

#[tokio::test]
async fn invalid_edit_changes_nothing() {
    let app = TestApp::new().await;
    let a = app.register(A).await;
    let id = add_note(&app, A, &a, "Groceries", false).await;
    let uri = format!("/edit_note/{id}");

    let reply = app
        .post(&uri, As::Bearer(&a), r#"{"noteName": "", "isPrivate": true}"#)
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.json["form"]["errors"][0]["field"], "noteName");

    let reply = app.post(&uri, As::Bearer(&a), "{").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(reply.json["form"]["noteName"], "Groceries");

    let (name, is_private, _) = app.note_row(id).await;
    assert_eq!(name, "Groceries");
    assert!(!is_private);
}
