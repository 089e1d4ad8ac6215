//! Backend Error Module
//!
//! Error types returned by handlers and middleware, and their HTTP rendering.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError, AuthError and status mapping
//! └── conversion.rs - IntoResponse (JSON body)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use journal_api::backend::error::ApiError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<serde_json::Value>, ApiError> {
//!     Err(ApiError::not_found("Entry not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{ApiError, AuthError};
