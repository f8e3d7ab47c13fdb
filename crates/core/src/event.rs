// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by waitlist transitions

use serde::{Deserialize, Serialize};

/// Something observable that happened to a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockEvent {
    /// A requester became the holder, either on an empty queue or by promotion
    Acquired { holder: String },
    /// The holder left the queue
    Released { holder: String },
    /// A requester was appended to the queue
    Joined { name: String, position: usize },
    /// A requester was removed from the queue
    Left { name: String, position: usize },
    /// Join by a requester that was already in the queue
    AlreadyQueued { name: String, position: usize },
    /// Leave by a requester that was not in the queue
    NotQueued { name: String },
}

impl LockEvent {
    /// Stable name used for log filtering
    pub fn name(&self) -> &'static str {
        match self {
            LockEvent::Acquired { .. } => "lock:acquired",
            LockEvent::Released { .. } => "lock:released",
            LockEvent::Joined { .. } => "queue:joined",
            LockEvent::Left { .. } => "queue:left",
            LockEvent::AlreadyQueued { .. } => "queue:already-queued",
            LockEvent::NotQueued { .. } => "queue:not-queued",
        }
    }

    /// Whether this event reflects a change to the stored queue
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            LockEvent::AlreadyQueued { .. } | LockEvent::NotQueued { .. }
        )
    }
}
