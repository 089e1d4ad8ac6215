/**
 * Login Handler
 *
 * This module implements the user authentication handler for `POST /login`.
 *
 * # Authentication Process
 *
 * 1. Require non-blank `username` and `password`
 * 2. Look up the user by username (404 if absent)
 * 3. Verify the password against the stored digest (401 on mismatch)
 * 4. Issue a token carrying the user's id and username
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::middleware::DbLease;
use crate::shared::error::require_field;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - `username` or `password` missing or blank
/// * `404 Not Found` - no user with that username
/// * `401 Unauthorized` - password does not match
/// * `500 Internal Server Error` - query or token issue failed
///
/// # Security Notes
///
/// - Password verification is constant-time (bcrypt)
/// - Passwords are never logged or returned in responses
pub async fn login(
    State(hasher): State<PasswordHasher>,
    State(tokens): State<Arc<TokenIssuer>>,
    db: DbLease,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload?;
    let username = require_field("username", request.username.as_deref())?;
    let password = require_field("password", request.password.as_deref())?;

    let user = {
        let mut lease = db.lock().await;
        get_user_by_username(lease.connection()?, username)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up user: {:?}", e);
                ApiError::from(e)
            })?
    };

    let Some(user) = user else {
        tracing::warn!("Login for unknown username: {}", username);
        return Err(ApiError::not_found("User not found"));
    };

    let valid = hasher
        .verify_async(password.to_string(), user.password_hash.clone())
        .await?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(ApiError::Unauthorized);
    }

    let jwt = tokens.issue(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("User logged in: {} ({})", user.username, user.id);
    Ok(Json(AuthResponse::issued(jwt)))
}
