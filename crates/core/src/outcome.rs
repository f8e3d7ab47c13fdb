// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Results of waitlist operations

use crate::queue::Queue;

/// Result of a join request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The queue after the request (unchanged when already a member)
    pub queue: Queue,
    pub already_member: bool,
}

/// Result of a leave request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// The queue after the request (unchanged when not a member)
    pub queue: Queue,
    pub was_member: bool,
    /// The removed entry was the holder
    pub was_holder: bool,
}

impl LeaveOutcome {
    /// The holder after the leave, if the queue is not empty
    pub fn next_holder(&self) -> Option<&str> {
        self.queue.holder().map(|e| e.name.as_str())
    }
}

/// Result of releasing whoever held the lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// The holder that was removed, if the queue was not empty
    pub released: Option<String>,
    pub leave: LeaveOutcome,
}
