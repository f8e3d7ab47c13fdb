// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake token authorizer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{TokenAuthorizer, TokenError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCall {
    pub user: String,
    pub channel: String,
    pub team: String,
}

/// Hands out `fake-token-N` and records every request
#[derive(Clone, Default)]
pub struct FakeTokenAuthorizer {
    calls: Arc<Mutex<Vec<TokenCall>>>,
    failing: Arc<Mutex<bool>>,
}

impl FakeTokenAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded token requests
    pub fn calls(&self) -> Vec<TokenCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make token creation fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = failing;
    }
}

#[async_trait]
impl TokenAuthorizer for FakeTokenAuthorizer {
    async fn create_access_token(
        &self,
        user: &str,
        channel: &str,
        team: &str,
    ) -> Result<String, TokenError> {
        if *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(TokenError::Unavailable("injected failure".to_string()));
        }
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls.push(TokenCall {
            user: user.to_string(),
            channel: channel.to_string(),
            team: team.to_string(),
        });
        Ok(format!("fake-token-{}", calls.len()))
    }

    async fn validate(
        &self,
        _user: &str,
        token: &str,
        _channel: &str,
        _team: &str,
    ) -> Result<bool, TokenError> {
        Ok(token.starts_with("fake-token-"))
    }
}
