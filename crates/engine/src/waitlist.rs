// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waitlist engine
//!
//! Every mutation is one read-modify-write cycle against the store: read the
//! queue and its version, apply the pure transition, and write back
//! conditionally. A conflicting write restarts the whole cycle from a fresh
//! read, up to `max_attempts`. The engine keeps no state between calls.

use crate::error::WaitlistError;
use lb_adapters::{LockStore, StoreError};
use lb_core::{
    require, Clock, JoinOutcome, LeaveOutcome, LockEvent, LockKey, Queue, QueueInput,
    ReleaseOutcome, Scope, WaitlistConfig,
};
use std::collections::BTreeMap;
use std::future::Future;
use tracing::Instrument;

/// A transition that was applied (or found to be a no-op)
struct Applied {
    queue: Queue,
    events: Vec<LockEvent>,
}

/// Coordinates queue mutations through a [`LockStore`]
#[derive(Clone)]
pub struct Waitlist<S, C> {
    store: S,
    clock: C,
    config: WaitlistConfig,
}

impl<S: LockStore, C: Clock> Waitlist<S, C> {
    pub fn new(store: S, clock: C, config: WaitlistConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append `requester` to the queue unless already present
    pub async fn join(&self, key: &LockKey, requester: &str) -> Result<JoinOutcome, WaitlistError> {
        require("user", requester)?;
        let span = tracing::info_span!("waitlist.join", %key, requester);
        let applied = self
            .mutate(
                key,
                QueueInput::Join {
                    name: requester.to_string(),
                },
            )
            .instrument(span)
            .await?;

        let already_member = applied
            .events
            .iter()
            .any(|e| matches!(e, LockEvent::AlreadyQueued { .. }));
        Ok(JoinOutcome {
            queue: applied.queue,
            already_member,
        })
    }

    /// Remove the entry named `requester`, wherever it sits
    pub async fn leave(
        &self,
        key: &LockKey,
        requester: &str,
    ) -> Result<LeaveOutcome, WaitlistError> {
        require("user", requester)?;
        let span = tracing::info_span!("waitlist.leave", %key, requester);
        let applied = self
            .mutate(
                key,
                QueueInput::Leave {
                    name: requester.to_string(),
                },
            )
            .instrument(span)
            .await?;

        let position = applied.events.iter().find_map(|e| match e {
            LockEvent::Left { position, .. } => Some(*position),
            _ => None,
        });
        Ok(LeaveOutcome {
            queue: applied.queue,
            was_member: position.is_some(),
            was_holder: position == Some(0),
        })
    }

    /// Remove whoever holds the lock, promoting the next waiter. The holder
    /// is taken from the same read the conditional write is based on, so a
    /// waiter is never removed in place of a holder that changed meanwhile.
    pub async fn release_holder(&self, key: &LockKey) -> Result<ReleaseOutcome, WaitlistError> {
        let span = tracing::info_span!("waitlist.release", %key);
        let applied = self
            .mutate(key, QueueInput::Release)
            .instrument(span)
            .await?;

        let released = applied.events.iter().find_map(|e| match e {
            LockEvent::Released { holder } => Some(holder.clone()),
            _ => None,
        });
        Ok(ReleaseOutcome {
            leave: LeaveOutcome {
                queue: applied.queue,
                was_member: released.is_some(),
                was_holder: released.is_some(),
            },
            released,
        })
    }

    /// Every non-empty queue in one scope, keyed by resource
    pub async fn list_all(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, WaitlistError> {
        let mut queues = self
            .bounded(self.store.list_by_scope(scope))
            .await
            .map_err(WaitlistError::StoreUnavailable)?;
        queues.retain(|_, queue| !queue.is_empty());
        Ok(queues)
    }

    /// The current holder's name, if the queue is not empty
    pub async fn current_holder(&self, key: &LockKey) -> Result<Option<String>, WaitlistError> {
        Ok(self
            .queue(key)
            .await?
            .holder()
            .map(|holder| holder.name.clone()))
    }

    /// The current queue for a key (empty when there is no record)
    pub async fn queue(&self, key: &LockKey) -> Result<Queue, WaitlistError> {
        let read = self
            .bounded(self.store.read(key))
            .await
            .map_err(WaitlistError::StoreUnavailable)?;
        Ok(read.value)
    }

    async fn mutate(&self, key: &LockKey, input: QueueInput) -> Result<Applied, WaitlistError> {
        let attempts = self.config.max_attempts.max(1);

        for attempt in 1..=attempts {
            let read = self
                .bounded(self.store.read(key))
                .await
                .map_err(WaitlistError::StoreUnavailable)?;

            let (queue, events) = read.value.transition(input.clone(), &self.clock);

            // No-ops never touch the store
            if queue == read.value {
                log_events(&events);
                return Ok(Applied { queue, events });
            }

            match self.bounded(self.store.write(key, &queue, read.version)).await {
                Ok(version) => {
                    tracing::debug!(%version, attempt, "committed");
                    log_events(&events);
                    return Ok(Applied { queue, events });
                }
                Err(e) if e.is_conflict() => {
                    tracing::debug!(attempt, error = %e, "lost write race, retrying");
                    tokio::task::yield_now().await;
                }
                Err(e) => return Err(WaitlistError::StoreUnavailable(e)),
            }
        }

        tracing::warn!(attempts, "conflict retries exhausted");
        Err(WaitlistError::StoreConflictExhausted {
            key: key.clone(),
            attempts,
        })
    }

    /// Bound a store call by the configured timeout.
    ///
    /// An elapsed timeout drops the caller's future but cannot cancel work
    /// the store already handed off (the file store writes on a blocking
    /// thread). A write reported as `StoreUnavailable` may therefore still
    /// have committed; callers must re-read rather than assume it did not.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let timeout = self.config.store_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(format!(
                "store call timed out after {:?}",
                timeout
            ))),
        }
    }
}

fn log_events(events: &[LockEvent]) {
    for event in events {
        if event.is_mutation() {
            tracing::info!(event = event.name(), ?event, "queue changed");
        } else {
            tracing::debug!(event = event.name(), ?event, "no change");
        }
    }
}

#[cfg(test)]
#[path = "waitlist_tests.rs"]
mod tests;
