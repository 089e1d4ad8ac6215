//! Connection lease integration tests
//!
//! The pool's outstanding count must return to zero after every request,
//! whatever the outcome.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{register_user, TestDatabase};

#[tokio::test]
async fn test_leases_returned_after_every_outcome() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    assert_eq!(db.outstanding(), 0);

    let (name, value) = user.auth_header();
    db.server.get("/entries").add_header(name.clone(), value.clone()).await.assert_status_ok();
    assert_eq!(db.outstanding(), 0);

    db.server
        .delete("/entries/404")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(db.outstanding(), 0);

    db.server.get("/cars").await.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(db.outstanding(), 0);

    db.server
        .post("/login")
        .json(&json!({ "username": "ada", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(db.outstanding(), 0);
}

#[tokio::test]
async fn test_exhausted_pool_returns_503() {
    let db = TestDatabase::with_pool(1, Duration::from_millis(200)).await;

    let held = db.state.db.acquire().await.unwrap();
    assert_eq!(db.outstanding(), 1);

    let response = db
        .server
        .post("/register")
        .json(&json!({ "username": "ada", "password": "analytical" }))
        .await;
    crate::assert_error_body!(
        response,
        StatusCode::SERVICE_UNAVAILABLE,
        "Service temporarily unavailable"
    );
    assert_eq!(db.outstanding(), 1);

    drop(held);
    assert_eq!(db.outstanding(), 0);

    register_user(&db.server, "ada", "analytical").await;
    assert_eq!(db.outstanding(), 0);
}
