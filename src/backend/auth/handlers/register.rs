/**
 * Register Handler
 *
 * This module implements the user registration handler for `POST /register`.
 *
 * # Registration Process
 *
 * 1. Require non-blank `username` and `password`, within column limits
 * 2. Hash the password (bcrypt, on the blocking pool)
 * 3. Insert the user on the request's leased connection
 * 4. Issue a token carrying the new id and username
 *
 * Uniqueness is enforced by the database; a duplicate username is a 409.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::{create_user, is_unique_violation};
use crate::backend::error::ApiError;
use crate::backend::middleware::DbLease;
use crate::backend::database::schema::{EMAIL_MAX, USERNAME_MAX};
use crate::shared::error::{check_length, require_field};

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - `username` or `password` missing or blank, a field too
///   long for its column, or body is not JSON
/// * `409 Conflict` - username already taken
/// * `500 Internal Server Error` - hashing, insert, or token issue failed
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "correct horse", "email": "alice@example.com" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "jwt": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "success": true }
/// ```
pub async fn register(
    State(hasher): State<PasswordHasher>,
    State(tokens): State<Arc<TokenIssuer>>,
    db: DbLease,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload?;
    let username = require_field("username", request.username.as_deref())?;
    let password = require_field("password", request.password.as_deref())?;
    let email = request.email.as_deref().filter(|e| !e.trim().is_empty());
    check_length("username", username, USERNAME_MAX)?;
    if let Some(email) = email {
        check_length("email", email, EMAIL_MAX)?;
    }

    tracing::info!("Register request for username: {}", username);

    let password_hash = hasher.hash_async(password.to_string()).await.map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::from(e)
    })?;

    let mut lease = db.lock().await;
    let settings = lease.settings();
    let created_at = settings.local_timestamp();
    let user_id = create_user(
        lease.connection()?,
        settings.backend(),
        username,
        email,
        &password_hash,
        &created_at,
    )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Username already exists: {}", username);
                ApiError::conflict("Username already taken")
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                ApiError::from(e)
            }
        })?;
    drop(lease);

    let jwt = tokens.issue(user_id, username).map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("User created successfully: {} ({})", username, user_id);
    Ok(Json(AuthResponse::issued(jwt)))
}
