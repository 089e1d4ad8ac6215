//! Authentication Handlers Module
//!
//! HTTP handlers for the public authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! └── login.rs    - User authentication handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /register
//! - **`login`** - POST /login
//!
//! Both run inside a connection lease but outside the gate pipeline.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

pub use types::{AuthResponse, LoginRequest, RegisterRequest};

pub use login::login;
pub use register::register;
