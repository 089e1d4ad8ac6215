//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A scratch database and router per test
//! - Authentication helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod database;

pub use auth_helpers::*;
pub use database::*;
