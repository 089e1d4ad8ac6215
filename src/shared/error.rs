//! Shared Error Types
//!
//! This module defines error types that are independent of the HTTP layer.
//! They describe request payload problems that handlers detect before any
//! database work happens.
//!
//! # Error Categories
//!
//! - `ValidationError` - A required field is missing, blank or too long
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use journal_api::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "username is required");
//! ```
use thiserror::Error;

/// Errors that can be raised outside of the HTTP layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build the error for a required field that was absent or blank
    pub fn missing(field: &str) -> Self {
        Self::validation(field, format!("{} is required", field))
    }
}

/// Return the value of a required text field
///
/// `None`, empty, and whitespace-only values are all rejected with a
/// `ValidationError` naming `field`. Accepted values are returned as sent.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SharedError::missing(field)),
    }
}

/// Reject text longer than `max` characters
///
/// Limits mirror the column widths in the schema, so an over-long value is a
/// 400 here instead of a strict-mode write failure later.
pub fn check_length(field: &str, value: &str, max: usize) -> Result<(), SharedError> {
    if value.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
    Ok(())
}
