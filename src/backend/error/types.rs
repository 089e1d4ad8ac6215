/**
 * API Error Types
 *
 * This module defines the error type every handler and middleware returns.
 * Each variant maps to exactly one HTTP status; the JSON rendering lives in
 * `conversion.rs`.
 *
 * # Status Code Mapping
 *
 * | Variant | Status |
 * |---|---|
 * | `Shared(ValidationError)` | 400 |
 * | `Shared(SerializationError)` | 400 |
 * | `Client { status, .. }` | `status` |
 * | `Auth(_)` | 401, or 500 for `AuthError::Internal` |
 * | `Unauthorized` | 401 |
 * | `Unavailable` | 503 |
 * | `Database(_)`, `Internal(_)` | 500 |
 *
 * Server-side failures never leak details to the client; the cause is logged
 * and the body carries a generic message.
 */

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::database::LeaseError;
use crate::shared::SharedError;

/// Generic message for server-side failures
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Generic message for a credential mismatch
pub const BAD_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Why a request failed authentication
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Authorization header is required")]
    MissingCredentials,
    /// Header present but not `Bearer <token>`
    #[error("Authorization header must use the Bearer scheme")]
    SchemeMismatch,
    /// Token signature is valid but it has expired
    #[error("Token has expired")]
    Expired,
    /// Token could not be verified
    #[error("Invalid token")]
    InvalidToken,
    /// Verification failed for a reason unrelated to the token itself
    #[error("Authentication failed")]
    Internal,
}

impl AuthError {
    /// Machine-readable code included in the error body
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "credentials_required",
            Self::SchemeMismatch => "credentials_bad_scheme",
            Self::Expired => "token_expired",
            Self::InvalidToken => "invalid_token",
            Self::Internal => "auth_internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::Expired,
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Internal(_) => Self::Internal,
        }
    }
}

/// Error returned from handlers and middleware
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload validation failure
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Request-level failure with an explicit status (404, 409, ...)
    #[error("{message}")]
    Client {
        status: StatusCode,
        message: String,
    },

    /// Bearer authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Username/password mismatch at login
    #[error("{}", BAD_CREDENTIALS_MESSAGE)]
    Unauthorized,

    /// No database connection could be leased
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a client error with a status code
    ///
    /// # Example
    ///
    /// ```rust
    /// use journal_api::backend::error::ApiError;
    /// use axum::http::StatusCode;
    ///
    /// let err = ApiError::client(StatusCode::NOT_FOUND, "Entry not found");
    /// ```
    pub fn client(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Client {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::client(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::client(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Shared(_) => StatusCode::BAD_REQUEST,
            Self::Client { status, .. } => *status,
            Self::Auth(err) => err.status_code(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client
    pub fn message(&self) -> String {
        match self {
            Self::Shared(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::Shared(SharedError::SerializationError { message }) => message.clone(),
            Self::Client { message, .. } => message.clone(),
            Self::Auth(err) => err.to_string(),
            Self::Unauthorized => BAD_CREDENTIALS_MESSAGE.to_string(),
            Self::Unavailable(_) => "Service temporarily unavailable".to_string(),
            Self::Database(_) | Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Authentication code, if this is an authentication failure
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Auth(err) => Some(err.code()),
            _ => None,
        }
    }
}

impl From<LeaseError> for ApiError {
    fn from(err: LeaseError) -> Self {
        match err {
            LeaseError::Exhausted | LeaseError::Unavailable(_) => Self::Unavailable(err.to_string()),
            LeaseError::Configure(_) | LeaseError::Released => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Shared(SharedError::serialization(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let status = rejection.status();
        if status.is_server_error() {
            Self::Internal(rejection.body_text())
        } else {
            Self::client(status, rejection.body_text())
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(format!("token issue failed: {}", err))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}
