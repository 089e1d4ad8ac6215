//! Middleware Module
//!
//! Request-pipeline middleware for the backend server.
//!
//! - **`lease`** - Binds one pooled connection to each request and releases it
//!   on every exit path
//! - **`auth`** - Ordered gate pipeline enforcing bearer-token authentication
//!   on protected routes
//!
//! # Ordering
//!
//! ```text
//! trace -> catch panic -> lease -> [gates, protected routes only] -> handler
//! ```

pub mod auth;
pub mod lease;

pub use auth::{
    gate_middleware, AuthUser, AuthenticatedUser, BearerToken, Gate, GateOutcome, GatePipeline,
};
pub use lease::{lease_middleware, DbLease, RequestLease};
