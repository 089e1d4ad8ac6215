//! Cars Module
//!
//! Second owned resource, handled the same way as journal entries.

pub mod db;
pub mod handlers;

pub use db::Car;
pub use handlers::{create_car, delete_car, list_cars};
