//! Database Module
//!
//! Connection pooling, per-request leases and schema bootstrap.
//!
//! # Module Structure
//!
//! ```text
//! database/
//! ├── mod.rs    - Module exports
//! ├── pool.rs   - Bounded pool and session settings
//! ├── lease.rs  - Counted, release-once connection lease
//! └── schema.rs - CREATE TABLE IF NOT EXISTS per dialect
//! ```

/// Bounded pool and session settings
pub mod pool;

/// Connection lease
pub mod lease;

/// Schema bootstrap
pub mod schema;

pub use lease::{Lease, LeaseError, LeaseState};
pub use pool::{Backend, DbPool, SessionSettings};
pub use schema::SchemaError;
