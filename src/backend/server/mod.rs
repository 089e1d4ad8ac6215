//! Server Module
//!
//! Startup wiring for the HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Database startup and StartupError
//! └── init.rs   - State construction, app creation, serve loop
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use journal_api::backend::server::run;
//! use journal_api::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! run(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Startup resource loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::StartupError;
pub use init::{build_state, create_app, run};
pub use state::AppState;
