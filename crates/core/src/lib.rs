// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lb-core: Core library for Lockbot
//!
//! This crate provides:
//! - The lock queue data model (keys, scopes, owner entries, queues)
//! - Pure waitlist transitions that emit lock events
//! - The response assembler that renders outcomes for chat delivery
//! - Clock abstraction and configuration types

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod key;
pub mod outcome;
pub mod queue;
pub mod response;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, LockbotConfig, WaitlistConfig};
pub use error::{require, CoreError};
pub use event::LockEvent;
pub use key::{LockKey, Scope};
pub use outcome::{JoinOutcome, LeaveOutcome, ReleaseOutcome};
pub use queue::{OwnerEntry, Queue, QueueInput, Version, Versioned};
pub use response::{Destination, Response};
