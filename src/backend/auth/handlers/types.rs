/**
 * Authentication Handler Types
 *
 * Request and response bodies for `/register` and `/login`.
 *
 * Request fields are optional at the serde level so that a missing field
 * produces the same 400 as a blank one, instead of a deserialization error.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    /// Unique username
    pub username: Option<String>,
    /// Plaintext password (hashed before storage)
    pub password: Option<String>,
    /// Optional contact address
    pub email: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by register and login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// Signed bearer token
    pub jwt: String,
    pub success: bool,
}

impl AuthResponse {
    pub fn issued(jwt: String) -> Self {
        Self { jwt, success: true }
    }
}
