//! Response Envelopes
//!
//! Small JSON bodies shared by the owned-resource routes.

use serde::{Deserialize, Serialize};

/// Body returned after creating a row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: i64,
    pub success: bool,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { id, success: true }
    }
}

/// Body returned by update and delete
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
