// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod lock;
pub mod token;

use anyhow::{Context, Result};
use lb_adapters::{JsonFileLockStore, JsonFileTokenAuthorizer, TracedLockStore};
use lb_core::{LockbotConfig, SystemClock};
use lb_engine::{LockBot, Waitlist};

pub type Bot = LockBot<TracedLockStore<JsonFileLockStore>, JsonFileTokenAuthorizer, SystemClock>;

/// Identity a command runs as
pub struct Requester {
    pub team: String,
    pub channel: String,
    pub user: String,
}

/// Open the durable stores under the configured state directory
pub fn open(config: &LockbotConfig) -> Result<Bot> {
    let dir = &config.state_dir;
    let store = JsonFileLockStore::open(dir)
        .with_context(|| format!("failed to open lock store in {}", dir.display()))?;
    let tokens = JsonFileTokenAuthorizer::open(dir)
        .with_context(|| format!("failed to open token store in {}", dir.display()))?;
    let waitlist = Waitlist::new(
        TracedLockStore::new(store),
        SystemClock,
        config.waitlist.clone(),
    );
    Ok(LockBot::new(waitlist, tokens))
}
