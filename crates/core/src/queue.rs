// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock queue state machine
//!
//! A queue is the FIFO list of requesters for one resource. Position 0 is the
//! holder, everyone after it is waiting. Holder status is derived from
//! position and never stored separately, so removing the holder promotes the
//! next entry without an extra step.

use crate::clock::Clock;
use crate::event::LockEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requester's membership in a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerEntry {
    pub name: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl OwnerEntry {
    pub fn new(name: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            joined_at,
        }
    }
}

/// Ordered owners of a resource. An empty queue means "no lock record".
/// Deserialization goes through [`Queue::from_entries`], so stored records
/// with repeated names load with one entry per name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<OwnerEntry>", into = "Vec<OwnerEntry>")]
pub struct Queue {
    entries: Vec<OwnerEntry>,
}

/// Requests that can change a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueInput {
    /// Append the requester unless already present
    Join { name: String },
    /// Remove the named entry wherever it sits
    Leave { name: String },
    /// Remove whoever holds the lock at the time of the transition
    Release,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from stored entries, dropping repeated names so the
    /// one-entry-per-name invariant holds even for hand-edited records
    pub fn from_entries(entries: impl IntoIterator<Item = OwnerEntry>) -> Self {
        let mut queue = Self::new();
        for entry in entries {
            if !queue.contains(&entry.name) {
                queue.entries.push(entry);
            }
        }
        queue
    }

    pub fn entries(&self) -> &[OwnerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current holder, if any
    pub fn holder(&self) -> Option<&OwnerEntry> {
        self.entries.first()
    }

    /// Everyone queued behind the holder, in order
    pub fn waiters(&self) -> &[OwnerEntry] {
        self.entries.get(1..).unwrap_or(&[])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Pure state transition function
    pub fn transition(&self, input: QueueInput, clock: &impl Clock) -> (Queue, Vec<LockEvent>) {
        let mut next = self.clone();
        let mut events = Vec::new();

        match input {
            QueueInput::Join { name } => {
                if let Some(position) = self.position(&name) {
                    events.push(LockEvent::AlreadyQueued { name, position });
                    return (next, events);
                }

                // Never earlier than the entry ahead, even if the clock stepped back
                let now = clock.now();
                let joined_at = match self.entries.last() {
                    Some(last) if last.joined_at > now => last.joined_at,
                    _ => now,
                };

                let position = next.entries.len();
                next.entries.push(OwnerEntry::new(name.clone(), joined_at));
                events.push(LockEvent::Joined {
                    name: name.clone(),
                    position,
                });
                if position == 0 {
                    events.push(LockEvent::Acquired { holder: name });
                }
            }

            QueueInput::Leave { name } => {
                let Some(position) = self.position(&name) else {
                    events.push(LockEvent::NotQueued { name });
                    return (next, events);
                };

                next.remove_at(position, &mut events);
            }

            QueueInput::Release => {
                if !next.is_empty() {
                    next.remove_at(0, &mut events);
                }
            }
        }

        (next, events)
    }

    fn remove_at(&mut self, position: usize, events: &mut Vec<LockEvent>) {
        let removed = self.entries.remove(position);
        events.push(LockEvent::Left {
            name: removed.name.clone(),
            position,
        });
        if position == 0 {
            events.push(LockEvent::Released {
                holder: removed.name,
            });
            if let Some(promoted) = self.holder() {
                events.push(LockEvent::Acquired {
                    holder: promoted.name.clone(),
                });
            }
        }
    }
}

impl From<Vec<OwnerEntry>> for Queue {
    fn from(entries: Vec<OwnerEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Queue> for Vec<OwnerEntry> {
    fn from(queue: Queue) -> Self {
        queue.entries
    }
}

/// Record version used for conditional writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u64);

impl Version {
    /// Version reported for keys with no stored record
    pub const ABSENT: Version = Version(0);

    pub fn next(self) -> Version {
        Version(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A value paired with the version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: Version,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: Version) -> Self {
        Self { value, version }
    }
}

impl Versioned<Queue> {
    /// What every store returns for a key it has no record of
    pub fn absent() -> Self {
        Self::new(Queue::new(), Version::ABSENT)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
