// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use crate::store::{LockStore, StoreError};
use async_trait::async_trait;
use lb_core::{LockKey, Queue, Scope, Version, Versioned};
use std::collections::BTreeMap;
use tracing::Instrument;

/// Wrapper that adds tracing to any LockStore
#[derive(Clone)]
pub struct TracedLockStore<S> {
    inner: S,
}

impl<S> TracedLockStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: LockStore> LockStore for TracedLockStore<S> {
    async fn read(&self, key: &LockKey) -> Result<Versioned<Queue>, StoreError> {
        let span = tracing::debug_span!("store.read", %key);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.read(key).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(read) => tracing::debug!(
                    version = %read.version,
                    len = read.value.len(),
                    elapsed_ms,
                    "read"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn write(
        &self,
        key: &LockKey,
        queue: &Queue,
        expected: Version,
    ) -> Result<Version, StoreError> {
        let span = tracing::info_span!("store.write", %key, %expected);
        async {
            tracing::debug!(len = queue.len(), "writing");

            let start = std::time::Instant::now();
            let result = self.inner.write(key, queue, expected).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(version) => tracing::info!(%version, elapsed_ms, "written"),
                // Conflicts are expected under contention and retried by the caller
                Err(e) if e.is_conflict() => {
                    tracing::debug!(elapsed_ms, error = %e, "write conflict")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "write failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, StoreError> {
        let span = tracing::debug_span!("store.list", %scope);
        async {
            let result = self.inner.list_by_scope(scope).await;
            match &result {
                Ok(queues) => tracing::debug!(count = queues.len(), "listed"),
                Err(e) => tracing::error!(error = %e, "list failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
