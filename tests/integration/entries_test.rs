//! Journal entry integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{decode_token, register_user, TestDatabase};

#[tokio::test]
async fn test_entry_lifecycle() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let (name, value) = user.auth_header();

    let response = db
        .server
        .post("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "Monday", "content": "Notes on the engine", "mood": "curious" }))
        .await;
    response.assert_status_ok();
    let created: serde_json::Value = response.json();
    assert_eq!(created["success"], true);
    let id = created["id"].as_i64().expect("id should be a number");

    let response = db
        .server
        .get("/entries")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    let listed: serde_json::Value = response.json();
    let entries = listed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id);
    assert_eq!(entries[0]["user_id"], decode_token(&user.token).user_id);
    assert_eq!(entries[0]["title"], "Monday");
    assert_eq!(entries[0]["mood"], "curious");

    db.server
        .put("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "id": id, "title": "Monday, revised", "content": "" }))
        .await
        .assert_status_ok();

    let listed: serde_json::Value = db
        .server
        .get("/entries")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(listed["entries"][0]["title"], "Monday, revised");
    assert_eq!(listed["entries"][0]["mood"], serde_json::Value::Null);

    db.server
        .delete(&format!("/entries/{id}"))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status_ok();

    let listed: serde_json::Value = db
        .server
        .get("/entries")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(listed["entries"], json!([]));

    // A soft-deleted entry can be neither deleted again nor updated
    let response = db
        .server
        .delete(&format!("/entries/{id}"))
        .add_header(name.clone(), value.clone())
        .await;
    crate::assert_error_body!(response, StatusCode::NOT_FOUND, "Entry not found");

    let response = db
        .server
        .put("/entries")
        .add_header(name, value)
        .json(&json!({ "id": id, "title": "ghost" }))
        .await;
    crate::assert_error_body!(response, StatusCode::NOT_FOUND, "Entry not found");
}

#[tokio::test]
async fn test_entries_listed_newest_first() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let (name, value) = user.auth_header();

    for title in ["first", "second", "third"] {
        db.server
            .post("/entries")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "title": title }))
            .await
            .assert_status_ok();
    }

    let listed: serde_json::Value = db.server.get("/entries").add_header(name, value).await.json();
    let titles: Vec<&str> = listed["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_entries_are_private_to_their_owner() {
    let db = TestDatabase::new().await;
    let ada = register_user(&db.server, "ada", "analytical").await;
    let grace = register_user(&db.server, "grace", "cobol").await;
    let (ada_name, ada_value) = ada.auth_header();
    let (grace_name, grace_value) = grace.auth_header();

    let created: serde_json::Value = db
        .server
        .post("/entries")
        .add_header(ada_name.clone(), ada_value.clone())
        .json(&json!({ "title": "private" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let listed: serde_json::Value = db
        .server
        .get("/entries")
        .add_header(grace_name.clone(), grace_value.clone())
        .await
        .json();
    assert_eq!(listed["entries"], json!([]));

    db.server
        .delete(&format!("/entries/{id}"))
        .add_header(grace_name.clone(), grace_value.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    db.server
        .put("/entries")
        .add_header(grace_name, grace_value)
        .json(&json!({ "id": id, "title": "hijacked" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: serde_json::Value = db
        .server
        .get("/entries")
        .add_header(ada_name, ada_value)
        .await
        .json();
    assert_eq!(listed["entries"][0]["title"], "private");
}

#[tokio::test]
async fn test_entry_validation() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let (name, value) = user.auth_header();

    let response = db
        .server
        .post("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "content": "no title" }))
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST, "title is required");

    let response = db
        .server
        .put("/entries")
        .add_header(name, value)
        .json(&json!({ "title": "no id" }))
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST, "id is required");
}

#[tokio::test]
async fn test_delete_entry_non_integer_id() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let (name, value) = user.auth_header();

    let response = db.server.delete("/entries/abc").add_header(name, value).await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty(), "body: {body}");
}

#[tokio::test]
async fn test_entry_fields_too_long() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let (name, value) = user.auth_header();

    let response = db
        .server
        .post("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "t".repeat(256) }))
        .await;
    crate::assert_error_body!(
        response,
        StatusCode::BAD_REQUEST,
        "title must be at most 255 characters"
    );

    let response = db
        .server
        .post("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "Monday", "mood": "m".repeat(65) }))
        .await;
    crate::assert_error_body!(
        response,
        StatusCode::BAD_REQUEST,
        "mood must be at most 64 characters"
    );

    // Multi-byte characters count once each
    db.server
        .post("/entries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "title": "é".repeat(255) }))
        .await
        .assert_status_ok();

    let listed: serde_json::Value = db.server.get("/entries").add_header(name, value).await.json();
    assert_eq!(listed["entries"].as_array().unwrap().len(), 1);
}
