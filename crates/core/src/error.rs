// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by the core data model

use thiserror::Error;

/// A request that cannot be turned into a valid queue operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid request: {field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Reject empty or whitespace-only identifiers
pub fn require(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::EmptyField { field });
    }
    Ok(())
}
