// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Lockbot waitlist engine and command layer

mod bot;
mod error;
mod waitlist;

pub use bot::LockBot;
pub use error::{BotError, WaitlistError};
pub use waitlist::Waitlist;
