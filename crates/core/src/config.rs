// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lockbot configuration
//!
//! Loaded from TOML. Every field has a default so an empty or missing file
//! is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "LOCKBOT_STATE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("waitlist.max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Retry and timeout policy for queue mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    /// Read-modify-write attempts before giving up on a contended key
    pub max_attempts: u32,
    /// Upper bound on any single store call
    #[serde(with = "humantime_serde")]
    pub store_timeout: Duration,
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl WaitlistConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockbotConfig {
    /// Where durable lock state and tokens live
    pub state_dir: PathBuf,
    /// Public base URL of the Lockbot API, used in token instructions
    pub api_url: String,
    pub waitlist: WaitlistConfig,
}

impl Default for LockbotConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            api_url: "http://localhost:3000".to_string(),
            waitlist: WaitlistConfig::default(),
        }
    }
}

impl LockbotConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or return defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Apply environment overrides using the given lookup
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(STATE_DIR_ENV).filter(|d| !d.is_empty()) {
            self.state_dir = PathBuf::from(dir);
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.waitlist.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

fn default_state_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("lockbot")
}
