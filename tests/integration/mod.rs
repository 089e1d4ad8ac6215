//! Integration tests
//!
//! Drive the full router over a scratch SQLite database

mod auth_test;
mod entries_test;
mod gates_test;
mod lease_test;
