// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token authorizer persisted next to the lock table

use super::{check, scope_of, upsert, Grant, TokenAuthorizer, TokenError, TokenGen, UuidTokenGen};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const TOKENS_FILE: &str = "tokens.json";
const LOCK_FILE: &str = "tokens.lock";

/// Stores token digests in `tokens.json` under an advisory file lock
#[derive(Clone, Debug)]
pub struct JsonFileTokenAuthorizer<G = UuidTokenGen> {
    base_path: PathBuf,
    tokens: G,
}

impl JsonFileTokenAuthorizer {
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, TokenError> {
        Self::with_generator(base_path, UuidTokenGen)
    }
}

impl<G: TokenGen> JsonFileTokenAuthorizer<G> {
    pub fn with_generator(base_path: impl Into<PathBuf>, tokens: G) -> Result<Self, TokenError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path, tokens })
    }

    /// Run `f` over the stored grants on a blocking thread under the
    /// exclusive lock, saving them afterwards when `save` is set
    async fn with_grants<T, F>(&self, save: bool, f: F) -> Result<T, TokenError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Vec<Grant>) -> T + Send + 'static,
    {
        let base_path = self.base_path.clone();
        tokio::task::spawn_blocking(move || {
            let lock = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(base_path.join(LOCK_FILE))?;
            FileExt::lock_exclusive(&lock)?;

            let path = base_path.join(TOKENS_FILE);
            let mut grants = load_grants(&path)?;
            let result = f(&mut grants);
            if save {
                save_grants(&path, &grants)?;
            }
            FileExt::unlock(&lock)?;
            Ok(result)
        })
        .await
        .map_err(|e| TokenError::Unavailable(format!("token task failed: {}", e)))?
    }
}

fn load_grants(path: &Path) -> Result<Vec<Grant>, TokenError> {
    match fs::read_to_string(path) {
        Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn save_grants(path: &Path, grants: &[Grant]) -> Result<(), TokenError> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = File::create(&tmp)?;
        file.write_all(serde_json::to_string_pretty(grants)?.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[async_trait]
impl<G: TokenGen> TokenAuthorizer for JsonFileTokenAuthorizer<G> {
    async fn create_access_token(
        &self,
        user: &str,
        channel: &str,
        team: &str,
    ) -> Result<String, TokenError> {
        let scope = scope_of(channel, team)?;
        let token = self.tokens.next();
        let grant = Grant::new(&scope, user, &token);
        self.with_grants(true, move |grants| upsert(grants, grant))
            .await?;
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
        let user = user.to_string();
        let token = token.to_string();
        self.with_grants(false, move |grants| check(grants, &scope, &user, &token))
            .await
    }
}
