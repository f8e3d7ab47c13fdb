// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! API access token issuance
//!
//! A token is scoped to `(user, channel, team)`. Each `(team, channel)` has
//! at most one live token: issuing a new one invalidates the previous one,
//! whoever it was issued to. Only a SHA-256 digest of the token is kept.

mod file;
mod generator;
mod memory;

pub use file::JsonFileTokenAuthorizer;
pub use generator::{SequentialTokenGen, TokenGen, UuidTokenGen};
pub use memory::MemoryTokenAuthorizer;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTokenAuthorizer, TokenCall};

use async_trait::async_trait;
use lb_core::{CoreError, Scope};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from token operations
#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    InvalidRequest(#[from] CoreError),
    #[error("token store unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Issues and checks API access tokens
#[async_trait]
pub trait TokenAuthorizer: Clone + Send + Sync + 'static {
    /// Issue a new token for `user`, replacing any token for the channel
    async fn create_access_token(
        &self,
        user: &str,
        channel: &str,
        team: &str,
    ) -> Result<String, TokenError>;

    /// Whether `token` is the live token for `user` in the channel
    async fn validate(
        &self,
        user: &str,
        token: &str,
        channel: &str,
        team: &str,
    ) -> Result<bool, TokenError>;
}

/// The live token of one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Grant {
    team: String,
    channel: String,
    user: String,
    digest: String,
}

impl Grant {
    fn new(scope: &Scope, user: &str, token: &str) -> Self {
        Self {
            team: scope.team.clone(),
            channel: scope.channel.clone(),
            user: user.to_string(),
            digest: digest(token),
        }
    }

    fn is_for(&self, scope: &Scope) -> bool {
        self.team == scope.team && self.channel == scope.channel
    }

    fn accepts(&self, user: &str, token: &str) -> bool {
        self.user == user && self.digest == digest(token)
    }
}

/// Replace the grant for the grant's channel
fn upsert(grants: &mut Vec<Grant>, grant: Grant) {
    grants.retain(|g| !(g.team == grant.team && g.channel == grant.channel));
    grants.push(grant);
}

fn check(grants: &[Grant], scope: &Scope, user: &str, token: &str) -> bool {
    grants
        .iter()
        .find(|g| g.is_for(scope))
        .is_some_and(|g| g.accepts(user, token))
}

fn scope_of(channel: &str, team: &str) -> Result<Scope, TokenError> {
    Ok(Scope::new(team, channel)?)
}

fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex_encode(&hasher.finalize())
}

// Hex encoding helper
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
