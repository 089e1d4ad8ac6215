//! Authentication API integration tests
//!
//! Tests for `/register` and `/login`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{decode_token, register_user, TestDatabase};

#[tokio::test]
async fn test_register_then_login() {
    let db = TestDatabase::new().await;

    let user = register_user(&db.server, "ada", "analytical").await;
    let registered = decode_token(&user.token);
    assert_eq!(registered.username, "ada");

    let response = db
        .server
        .post("/login")
        .json(&json!({ "username": "ada", "password": "analytical" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    let claims = decode_token(body["jwt"].as_str().unwrap());
    assert_eq!(claims.user_id, registered.user_id);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_register_accepts_email() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .post("/register")
        .json(&json!({ "username": "grace", "password": "cobol", "email": "grace@navy.mil" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["jwt"].as_str().is_some_and(|jwt| !jwt.is_empty()));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let db = TestDatabase::new().await;
    register_user(&db.server, "ada", "analytical").await;

    let response = db
        .server
        .post("/register")
        .json(&json!({ "username": "ada", "password": "different" }))
        .await;

    crate::assert_error_body!(response, StatusCode::CONFLICT, "Username already taken");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .post("/register")
        .json(&json!({ "password": "analytical" }))
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST, "username is required");

    let response = db
        .server
        .post("/register")
        .json(&json!({ "username": "ada", "password": "" }))
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST, "password is required");
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .post("/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(db.outstanding(), 0);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .post("/login")
        .json(&json!({ "username": "nobody", "password": "whatever" }))
        .await;

    crate::assert_error_body!(response, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let db = TestDatabase::new().await;
    register_user(&db.server, "ada", "analytical").await;

    let response = db
        .server
        .post("/login")
        .json(&json!({ "username": "ada", "password": "difference engine" }))
        .await;

    crate::assert_error_body!(
        response,
        StatusCode::UNAUTHORIZED,
        "Invalid username or password"
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let db = TestDatabase::new().await;

    let response = db.server.get("/nowhere").await;

    crate::assert_error_body!(response, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_register_username_too_long() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .post("/register")
        .json(&json!({ "username": "u".repeat(256), "password": "analytical" }))
        .await;
    crate::assert_error_body!(
        response,
        StatusCode::BAD_REQUEST,
        "username must be at most 255 characters"
    );
}

#[tokio::test]
async fn test_inserted_ids_are_distinct() {
    let db = TestDatabase::new().await;
    let ada = decode_token(&register_user(&db.server, "ada", "analytical").await.token);
    let bob = decode_token(&register_user(&db.server, "bob", "difference").await.token);

    assert!(ada.user_id >= 1);
    assert_ne!(ada.user_id, bob.user_id);
}
