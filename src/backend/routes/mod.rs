//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Router assembly and pipeline layers
//! └── api_routes.rs - Public and protected route tables
//! ```
//!
//! # Routes
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | `/register` | public |
//! | POST | `/login` | public |
//! | GET, POST, PUT | `/entries` | bearer |
//! | DELETE | `/entries/{id}` | bearer |
//! | GET, POST | `/cars` | bearer |
//! | DELETE | `/cars/{id}` | bearer |

/// Main router creation
pub mod router;

/// API endpoint tables
pub mod api_routes;

pub use router::create_router;
