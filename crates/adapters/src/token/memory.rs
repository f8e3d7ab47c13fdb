// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process token authorizer

use super::{check, scope_of, upsert, Grant, TokenAuthorizer, TokenError, TokenGen, UuidTokenGen};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Keeps token digests for the lifetime of the process
#[derive(Clone, Default)]
pub struct MemoryTokenAuthorizer<G = UuidTokenGen> {
    tokens: G,
    grants: Arc<Mutex<Vec<Grant>>>,
}

impl MemoryTokenAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: TokenGen> MemoryTokenAuthorizer<G> {
    pub fn with_generator(tokens: G) -> Self {
        Self {
            tokens,
            grants: Arc::default(),
        }
    }
}

#[async_trait]
impl<G: TokenGen> TokenAuthorizer for MemoryTokenAuthorizer<G> {
    async fn create_access_token(
        &self,
        user: &str,
        channel: &str,
        team: &str,
    ) -> Result<String, TokenError> {
        let scope = scope_of(channel, team)?;
        let token = self.tokens.next();
        let mut grants = self.grants.lock().unwrap_or_else(|e| e.into_inner());
        upsert(&mut grants, Grant::new(&scope, user, &token));
        Ok(token)
    }

    async fn validate(
        &self,
        user: &str,
        token: &str,
        channel: &str,
        team: &str,
    ) -> Result<bool, TokenError> {
        let scope = scope_of(channel, team)?;
        let grants = self.grants.lock().unwrap_or_else(|e| e.into_inner());
        Ok(check(&grants, &scope, user, token))
    }
}
