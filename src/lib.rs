//! Journal API - Main Library
//!
//! A small HTTP API for registration, login and owned-resource CRUD
//! (journal entries and cars) behind bearer-token authentication.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP dependency
//!   - Configuration (`AppConfig`)
//!   - Validation errors, response envelopes
//!
//! - **`backend`** - The Axum server
//!   - Per-request connection leases over a bounded sqlx pool
//!   - bcrypt password hashing and HS256 session tokens
//!   - Gate pipeline enforcing authentication on protected routes
//!
//! # Usage
//!
//! ```rust,no_run
//! use journal_api::backend::server::create_app;
//! use journal_api::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let (app, _state) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `thiserror` enums throughout
//! - `shared::error::SharedError` for payload validation
//! - `backend::error::ApiError` for everything that becomes an HTTP response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
