// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake lock store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LockStore, MemoryLockStore, StoreError};
use async_trait::async_trait;
use lb_core::{LockKey, Queue, Scope, Version, Versioned};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Read { key: LockKey },
    Write { key: LockKey, names: Vec<String>, expected: Version },
    List { scope: Scope },
}

/// A competing writer that lands just before the next caller write
type Interloper = Box<dyn FnOnce(&Queue) -> Queue + Send>;

#[derive(Default)]
struct Faults {
    failing_reads: u32,
    failing_writes: u32,
    stalled: bool,
    lagging_writes: bool,
    interlopers: VecDeque<Interloper>,
}

/// In-memory store that records calls and injects failures
#[derive(Clone, Default)]
pub struct FakeLockStore {
    inner: MemoryLockStore,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    faults: Arc<Mutex<Faults>>,
}

impl FakeLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of recorded writes
    pub fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Write { .. }))
            .count()
    }

    /// Make the next `n` reads fail as unavailable
    pub fn fail_reads(&self, n: u32) {
        self.faults().failing_reads = n;
    }

    /// Make the next `n` writes fail as unavailable
    pub fn fail_writes(&self, n: u32) {
        self.faults().failing_writes = n;
    }

    /// Make every call hang until cleared
    pub fn set_stalled(&self, stalled: bool) {
        self.faults().stalled = stalled;
    }

    /// Let writes commit and then hang before reporting back
    pub fn set_lagging_writes(&self, lagging: bool) {
        self.faults().lagging_writes = lagging;
    }

    /// Before the next write, let a competing writer change the stored queue
    /// so that the caller's write conflicts
    pub fn interleave(&self, change: impl FnOnce(&Queue) -> Queue + Send + 'static) {
        self.faults().interlopers.push_back(Box::new(change));
    }

    /// Seed a queue directly
    pub async fn seed(&self, key: &LockKey, queue: &Queue) -> Result<Version, StoreError> {
        let current = self.inner.read(key).await?;
        self.inner.write(key, queue, current.version).await
    }

    fn faults(&self) -> std::sync::MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    async fn stall_if_requested(&self) {
        let stalled = self.faults().stalled;
        if stalled {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl LockStore for FakeLockStore {
    async fn read(&self, key: &LockKey) -> Result<Versioned<Queue>, StoreError> {
        self.record(StoreCall::Read { key: key.clone() });
        self.stall_if_requested().await;

        {
            let mut faults = self.faults();
            if faults.failing_reads > 0 {
                faults.failing_reads -= 1;
                return Err(StoreError::Unavailable("injected read failure".to_string()));
            }
        }

        self.inner.read(key).await
    }

    async fn write(
        &self,
        key: &LockKey,
        queue: &Queue,
        expected: Version,
    ) -> Result<Version, StoreError> {
        self.record(StoreCall::Write {
            key: key.clone(),
            names: queue.names().into_iter().map(String::from).collect(),
            expected,
        });
        self.stall_if_requested().await;

        let interloper = {
            let mut faults = self.faults();
            if faults.failing_writes > 0 {
                faults.failing_writes -= 1;
                return Err(StoreError::Unavailable("injected write failure".to_string()));
            }
            faults.interlopers.pop_front()
        };

        if let Some(change) = interloper {
            let current = self.inner.read(key).await?;
            let changed = change(&current.value);
            self.inner.write(key, &changed, current.version).await?;
        }

        let version = self.inner.write(key, queue, expected).await?;
        let lagging = self.faults().lagging_writes;
        if lagging {
            std::future::pending::<()>().await;
        }
        Ok(version)
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, StoreError> {
        self.record(StoreCall::List {
            scope: scope.clone(),
        });
        self.stall_if_requested().await;

        {
            let mut faults = self.faults();
            if faults.failing_reads > 0 {
                faults.failing_reads -= 1;
                return Err(StoreError::Unavailable("injected read failure".to_string()));
            }
        }

        self.inner.list_by_scope(scope).await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
