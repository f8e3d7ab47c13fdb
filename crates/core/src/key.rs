// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of a lock queue
//!
//! A queue is addressed by `(team, channel, resource)`. The `(team, channel)`
//! pair is the [`Scope`] that partitions queues from one another. Components
//! are compared exactly (case-sensitive) and never normalised.

use crate::error::{require, CoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(team, channel)` pair that partitions all resource queues
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub team: String,
    pub channel: String,
}

impl Scope {
    pub fn new(team: impl Into<String>, channel: impl Into<String>) -> Result<Self, CoreError> {
        let scope = Self {
            team: team.into(),
            channel: channel.into(),
        };
        require("team", &scope.team)?;
        require("channel", &scope.channel)?;
        Ok(scope)
    }

    /// Address a resource within this scope
    pub fn key(&self, resource: impl Into<String>) -> Result<LockKey, CoreError> {
        LockKey::new(self.team.clone(), self.channel.clone(), resource)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.team, self.channel)
    }
}

/// Composite identity of one resource queue
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LockKey {
    pub team: String,
    pub channel: String,
    pub resource: String,
}

impl LockKey {
    pub fn new(
        team: impl Into<String>,
        channel: impl Into<String>,
        resource: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let key = Self {
            team: team.into(),
            channel: channel.into(),
            resource: resource.into(),
        };
        require("team", &key.team)?;
        require("channel", &key.channel)?;
        require("resource", &key.resource)?;
        Ok(key)
    }

    pub fn scope(&self) -> Scope {
        Scope {
            team: self.team.clone(),
            channel: self.channel.clone(),
        }
    }

    /// Whether this key belongs to the given scope
    pub fn in_scope(&self, scope: &Scope) -> bool {
        self.team == scope.team && self.channel == scope.channel
    }
}

impl fmt::Display for LockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.team, self.channel, self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_structurally() {
        let a = LockKey::new("T", "C", "dev").unwrap();
        let b = LockKey::new("T", "C", "dev").unwrap();
        let c = LockKey::new("T", "C", "Dev").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn separator_characters_do_not_collide() {
        // With string concatenation these two would share "a#b#c"
        let a = LockKey::new("a#b", "c", "r").unwrap();
        let b = LockKey::new("a", "b#c", "r").unwrap();
        assert_ne!(a, b);
        assert_ne!(a.scope(), b.scope());
    }

    #[test]
    fn empty_components_are_rejected() {
        assert_eq!(
            LockKey::new("T", "C", "").unwrap_err(),
            CoreError::EmptyField { field: "resource" }
        );
        assert_eq!(
            LockKey::new("", "C", "dev").unwrap_err(),
            CoreError::EmptyField { field: "team" }
        );
        assert_eq!(
            Scope::new("T", "  ").unwrap_err(),
            CoreError::EmptyField { field: "channel" }
        );
    }

    #[test]
    fn key_reports_its_scope() {
        let scope = Scope::new("T", "C").unwrap();
        let key = scope.key("dev").unwrap();
        assert!(key.in_scope(&scope));
        assert!(!key.in_scope(&Scope::new("T", "other").unwrap()));
        assert_eq!(key.to_string(), "T/C/dev");
    }
}
