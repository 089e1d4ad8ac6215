//! Property-based tests
//!
//! Invariants that should hold for arbitrary inputs

mod config_proptest;
mod token_proptest;
