/**
 * Authentication Gate
 *
 * Protected routes sit behind an ordered pipeline of gates. Each gate sees
 * the request head, may add to its extensions, and either lets the request
 * continue or rejects it. The first rejection ends the request; the handler
 * never runs.
 *
 * # Default Pipeline
 *
 * 1. `require_bearer` - `Authorization: Bearer <token>` must be present and
 *    well formed; stores the raw `BearerToken`
 * 2. `verify_bearer` - the token must verify; stores `AuthenticatedUser`
 *
 * Each request is checked once, using only its own header. Nothing is cached
 * between requests.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::backend::error::{ApiError, AuthError};
use crate::backend::server::state::AppState;

/// Raw token taken from the `Authorization` header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Identity established by a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

/// What a gate decided
#[derive(Debug)]
pub enum GateOutcome {
    Continue,
    Reject(ApiError),
}

/// A single check in the pipeline
pub type Gate = fn(&AppState, &mut Parts) -> GateOutcome;

/// Ordered list of gates run before protected handlers
#[derive(Clone)]
pub struct GatePipeline {
    gates: Arc<[Gate]>,
}

impl GatePipeline {
    pub fn new(gates: Vec<Gate>) -> Self {
        Self {
            gates: Arc::from(gates),
        }
    }

    /// Bearer-token authentication: `[require_bearer, verify_bearer]`
    pub fn authentication() -> Self {
        Self::new(vec![require_bearer as Gate, verify_bearer as Gate])
    }

    /// Run every gate in order, stopping at the first rejection
    pub fn run(&self, state: &AppState, parts: &mut Parts) -> Result<(), ApiError> {
        for gate in self.gates.iter() {
            if let GateOutcome::Reject(err) = gate(state, parts) {
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for GatePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatePipeline").field("gates", &self.gates.len()).finish()
    }
}

/// Gate middleware
///
/// Applied with `route_layer` to the protected routes only.
pub async fn gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    state.gates.run(&state, &mut parts)?;
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Parse an `Authorization` value of the form `Bearer <token>`
///
/// The value must split on single spaces into exactly two parts: the scheme
/// (compared case-insensitively) and a non-empty token.
pub fn parse_bearer(value: &HeaderValue) -> Result<String, AuthError> {
    let text = value.to_str().map_err(|_| AuthError::SchemeMismatch)?;
    let mut pieces = text.split(' ');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() =>
        {
            Ok(token.to_string())
        }
        _ => Err(AuthError::SchemeMismatch),
    }
}

/// Require a well-formed bearer credential
pub fn require_bearer(_state: &AppState, parts: &mut Parts) -> GateOutcome {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        tracing::warn!("Missing Authorization header on {}", parts.uri.path());
        return GateOutcome::Reject(AuthError::MissingCredentials.into());
    };

    match parse_bearer(value) {
        Ok(token) => {
            parts.extensions.insert(BearerToken(token));
            GateOutcome::Continue
        }
        Err(err) => {
            tracing::warn!("Malformed Authorization header on {}", parts.uri.path());
            GateOutcome::Reject(err.into())
        }
    }
}

/// Verify the bearer token and attach the user it names
pub fn verify_bearer(state: &AppState, parts: &mut Parts) -> GateOutcome {
    let verified = match parts.extensions.get::<BearerToken>() {
        Some(BearerToken(token)) => state.tokens.verify(token),
        None => return GateOutcome::Reject(AuthError::MissingCredentials.into()),
    };

    match verified {
        Ok(claims) => {
            parts.extensions.insert(AuthenticatedUser {
                user_id: claims.user_id,
                username: claims.username,
            });
            GateOutcome::Continue
        }
        Err(err) => {
            let err = AuthError::from(err);
            tracing::warn!("Token rejected on {}: {}", parts.uri.path(), err);
            GateOutcome::Reject(err.into())
        }
    }
}

/// Axum extractor for the authenticated user
///
/// Only meaningful behind the gate pipeline; elsewhere it rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::from(AuthError::MissingCredentials)
            })?;

        Ok(AuthUser(user))
    }
}
