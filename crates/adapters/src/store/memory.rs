// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process lock store
//!
//! Single-node reference store for tests and small deployments. State lives
//! for the lifetime of the process.

use super::{LockStore, StoreError};
use async_trait::async_trait;
use lb_core::{LockKey, Queue, Scope, Version, Versioned};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Records {
    queues: HashMap<LockKey, Versioned<Queue>>,
    /// Store-wide version counter. Versions are never reused, so a key that
    /// is deleted and recreated cannot match a stale read.
    last_version: Version,
}

/// Process-wide map guarded by one mutex. The version check and the
/// mutation happen in the same critical section.
#[derive(Clone, Debug, Default)]
pub struct MemoryLockStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (non-empty) queues across all scopes
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queues
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn read(&self, key: &LockKey) -> Result<Versioned<Queue>, StoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records
            .queues
            .get(key)
            .cloned()
            .unwrap_or_else(Versioned::absent))
    }

    async fn write(
        &self,
        key: &LockKey,
        queue: &Queue,
        expected: Version,
    ) -> Result<Version, StoreError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        let found = records
            .queues
            .get(key)
            .map(|v| v.version)
            .unwrap_or(Version::ABSENT);
        if found != expected {
            return Err(StoreError::Conflict {
                key: key.clone(),
                expected,
                found,
            });
        }

        if queue.is_empty() {
            records.queues.remove(key);
            return Ok(Version::ABSENT);
        }

        records.last_version = records.last_version.next();
        let version = records.last_version;
        records
            .queues
            .insert(key.clone(), Versioned::new(queue.clone(), version));
        Ok(version)
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, StoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records
            .queues
            .iter()
            .filter(|(key, stored)| key.in_scope(scope) && !stored.value.is_empty())
            .map(|(key, stored)| (key.resource.clone(), stored.value.clone()))
            .collect())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
