//! Shared Module
//!
//! This module contains types that do not depend on the HTTP layer:
//! process configuration, payload validation errors and response envelopes.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// JSON response envelopes
pub mod responses;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use responses::{CreatedResponse, SuccessResponse};
