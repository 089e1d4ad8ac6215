//! Authentication Module
//!
//! User registration, login, password hashing and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - JWT issue and verification
//! ├── users.rs        - User model and database operations
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - POST /register
//!     └── login.rs    - POST /login
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username + password → user created → token returned
//! 2. **Login**: username + password → digest verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → gate pipeline
//!    verifies → handler sees `AuthUser`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt; the cost is configurable
//! - Tokens are HS256 and expire after 30 days by default
//! - Handlers take the owner id from verified claims, never from the body

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// User data model and database operations
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest};
pub use handlers::{login, register};
pub use password::PasswordHasher;
pub use sessions::{Claims, TokenError, TokenIssuer};
