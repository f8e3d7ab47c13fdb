// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the waitlist engine

use lb_adapters::{StoreError, TokenError};
use lb_core::{CoreError, LockKey};
use thiserror::Error;

/// Errors surfaced by waitlist operations. Membership no-ops are normal
/// outcomes, not errors.
#[derive(Debug, Error)]
pub enum WaitlistError {
    #[error(transparent)]
    InvalidRequest(#[from] CoreError),
    /// A read or write did not complete. No partial mutation was applied.
    #[error("lock store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
    /// Every read-modify-write attempt lost to a concurrent writer
    #[error("gave up on {key} after {attempts} conflicting writes")]
    StoreConflictExhausted { key: LockKey, attempts: u32 },
}

/// Errors surfaced by chat commands
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Waitlist(#[from] WaitlistError),
    #[error("token issuance failed: {0}")]
    Token(#[from] TokenError),
}
