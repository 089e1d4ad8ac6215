//! Authentication gate integration tests
//!
//! Every protected route must reject before the handler runs.

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderValue, StatusCode};
use axum_test::TestServer;
use journal_api::backend::error::AuthError;
use journal_api::backend::middleware::{Gate, GateOutcome, GatePipeline};
use journal_api::backend::routes::create_router;
use journal_api::backend::server::AppState;
use serde_json::json;

use crate::common::{bearer, decode_token, expired_token, register_user, TestDatabase};

#[tokio::test]
async fn test_missing_header_rejected_without_write() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;

    let response = db.server.post("/entries").json(&json!({ "title": "sneaky" })).await;
    crate::assert_auth_code!(response, "credentials_required");

    let response = db.server.post("/cars").json(&json!({ "make": "a", "model": "b" })).await;
    crate::assert_auth_code!(response, "credentials_required");

    let (name, value) = user.auth_header();
    let listed: serde_json::Value = db.server.get("/entries").add_header(name, value).await.json();
    assert_eq!(listed["entries"], json!([]));
}

#[tokio::test]
async fn test_every_protected_route_is_gated() {
    let db = TestDatabase::new().await;

    crate::assert_auth_code!(db.server.get("/entries").await, "credentials_required");
    crate::assert_auth_code!(db.server.put("/entries").await, "credentials_required");
    crate::assert_auth_code!(db.server.delete("/entries/1").await, "credentials_required");
    crate::assert_auth_code!(db.server.get("/cars").await, "credentials_required");
    crate::assert_auth_code!(db.server.delete("/cars/1").await, "credentials_required");
    assert_eq!(db.outstanding(), 0);
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let db = TestDatabase::new().await;

    let response = db
        .server
        .get("/entries")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Basic YWRhOmFuYWx5dGljYWw="))
        .await;

    crate::assert_auth_code!(response, "credentials_bad_scheme");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;
    let claims = decode_token(&user.token);

    let (name, value) = bearer(&expired_token(claims.user_id, &claims.username));
    let response = db.server.get("/entries").add_header(name, value).await;

    crate::assert_auth_code!(response, "token_expired");
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;

    let mut forged = user.token.clone();
    forged.push('x');
    let (name, value) = bearer(&forged);
    let response = db.server.get("/cars").add_header(name, value).await;

    crate::assert_auth_code!(response, "invalid_token");
}

#[tokio::test]
async fn test_public_routes_ignore_bad_tokens() {
    let db = TestDatabase::new().await;

    let (name, value) = bearer("not-a-token");
    db.server
        .post("/register")
        .add_header(name, value)
        .json(&json!({ "username": "ada", "password": "analytical" }))
        .await
        .assert_status(StatusCode::OK);
}

fn fail_internally(_: &AppState, _: &mut Parts) -> GateOutcome {
    GateOutcome::Reject(AuthError::Internal.into())
}

#[tokio::test]
async fn test_internal_gate_failure_is_500_and_releases_lease() {
    let db = TestDatabase::new().await;
    let user = register_user(&db.server, "ada", "analytical").await;

    let mut state = db.state.clone();
    state.gates = GatePipeline::new(vec![fail_internally as Gate]);
    let server = TestServer::new(create_router(state)).expect("Failed to start test server");

    let (name, value) = user.auth_header();
    let response = server.get("/entries").add_header(name, value).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 500);
    assert_eq!(body["code"], "auth_internal");
    assert_eq!(body["error"], AuthError::Internal.to_string());
    assert_eq!(db.outstanding(), 0);
}
