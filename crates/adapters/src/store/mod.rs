// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock queue storage
//!
//! The store exclusively owns persisted queue state. Callers read a queue
//! with its version, compute the next queue, and write it back
//! conditionally: the write only lands if the stored version is still the
//! one that was read. Two concurrent read-modify-write cycles on the same
//! key therefore cannot silently overwrite each other; the loser gets
//! [`StoreError::Conflict`] and must start over from a fresh read.

mod file;
mod memory;

pub use file::JsonFileLockStore;
pub use memory::MemoryLockStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLockStore, StoreCall};

use async_trait::async_trait;
use lb_core::{LockKey, Queue, Scope, Version, Versioned};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write conflict on {key}: expected {expected}, found {found}")]
    Conflict {
        key: LockKey,
        expected: Version,
        found: Version,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Durable home of every resource queue
#[async_trait]
pub trait LockStore: Clone + Send + Sync + 'static {
    /// Read a queue and its version. Absent keys read as an empty queue at
    /// [`Version::ABSENT`].
    async fn read(&self, key: &LockKey) -> Result<Versioned<Queue>, StoreError>;

    /// Replace a queue if it is still at `expected`. An empty queue removes
    /// the record. Returns the new version.
    async fn write(
        &self,
        key: &LockKey,
        queue: &Queue,
        expected: Version,
    ) -> Result<Version, StoreError>;

    /// All non-empty queues in one scope, keyed by resource
    async fn list_by_scope(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, StoreError>;

    /// Remove a record if it is still at `expected`
    async fn delete_or_clear(&self, key: &LockKey, expected: Version) -> Result<(), StoreError> {
        self.write(key, &Queue::new(), expected).await.map(|_| ())
    }
}
