//! Journal Entries Module
//!
//! Owned-resource CRUD for journal entries: list, create, update and
//! soft delete.

pub mod db;
pub mod handlers;

pub use db::Entry;
pub use handlers::{create_entry, delete_entry, list_entries, update_entry};
