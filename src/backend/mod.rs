//! Backend Module
//!
//! Server-side code for the journal API: an Axum HTTP server with
//! per-request database leases and bearer-token authentication.
//!
//! # Architecture
//!
//! - **`server`** - Startup, application state, serve loop
//! - **`routes`** - Route tables and pipeline layers
//! - **`database`** - Connection pool, leases, schema
//! - **`middleware`** - Lease middleware and authentication gates
//! - **`auth`** - Password hashing, tokens, register/login
//! - **`entries`** - Journal entry CRUD
//! - **`cars`** - Car CRUD
//! - **`error`** - `ApiError` and its HTTP rendering
//!
//! # Request Pipeline
//!
//! ```text
//! request
//!   -> trace -> catch panic
//!   -> lease (acquire + configure session)
//!   -> public handler | gate pipeline -> protected handler
//!   -> lease (release)
//! response
//! ```
//!
//! # Thread Safety
//!
//! `AppState` is immutable after startup and cheap to clone. The only shared
//! mutable resource is the pool, whose bound and acquire timeout are the
//! service's backpressure.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Database pool and leases
pub mod database;

/// Middleware for request processing
pub mod middleware;

/// Authentication and user management
pub mod auth;

/// Journal entries
pub mod entries;

/// Cars
pub mod cars;

/// Backend error types
pub mod error;

pub use error::ApiError;
pub use server::{create_app, AppState};
