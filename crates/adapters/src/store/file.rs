// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable JSON file lock store
//!
//! All queues live in one table file (`locks.json`), one record per
//! `(team, channel, resource)`. Writers take an exclusive advisory lock on a
//! sibling lock file, re-read the table, check the record version, and
//! replace the table atomically (temp file + rename). Readers take a shared
//! lock. This keeps conditional writes correct across processes.

use super::{LockStore, StoreError};
use async_trait::async_trait;
use fs2::FileExt;
use lb_core::{LockKey, Queue, Scope, Version, Versioned};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const TABLE_FILE: &str = "locks.json";
const LOCK_FILE: &str = "locks.lock";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    team: String,
    channel: String,
    resource: String,
    owners: Queue,
    version: Version,
}

impl Record {
    fn matches(&self, key: &LockKey) -> bool {
        self.team == key.team && self.channel == key.channel && self.resource == key.resource
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Table {
    /// Store-wide counter so versions are never reused after a delete
    last_version: Version,
    records: Vec<Record>,
}

/// Lock store persisted to a JSON table on local disk
#[derive(Clone, Debug)]
pub struct JsonFileLockStore {
    base_path: PathBuf,
}

impl JsonFileLockStore {
    /// Open a store in the given directory, creating it if needed
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn table_path(&self) -> PathBuf {
        self.base_path.join(TABLE_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.base_path.join(LOCK_FILE)
    }

    fn open_lock_file(&self) -> Result<File, StoreError> {
        Ok(OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?)
    }

    /// Run `f` on a blocking thread while holding the shared lock
    async fn with_shared<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Table) -> T + Send + 'static,
    {
        let store = self.clone();
        blocking(move || {
            let lock = store.open_lock_file()?;
            FileExt::lock_shared(&lock)?;
            let table = load_table(&store.table_path())?;
            let result = f(&table);
            FileExt::unlock(&lock)?;
            Ok(result)
        })
        .await
    }

    /// Run `f` on a blocking thread while holding the exclusive lock, saving
    /// the table if `f` succeeds
    async fn with_exclusive<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Table) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        blocking(move || {
            let lock = store.open_lock_file()?;
            FileExt::lock_exclusive(&lock)?;
            let path = store.table_path();
            let mut table = load_table(&path)?;
            let result = f(&mut table)?;
            save_table(&path, &table)?;
            FileExt::unlock(&lock)?;
            Ok(result)
        })
        .await
    }
}

async fn blocking<T, F>(f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(format!("store task failed: {}", e)))?
}

fn load_table(path: &Path) -> Result<Table, StoreError> {
    match fs::read_to_string(path) {
        Ok(json) if json.trim().is_empty() => Ok(Table::default()),
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Table::default()),
        Err(e) => Err(e.into()),
    }
}

fn save_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(table)?;
    {
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[async_trait]
impl LockStore for JsonFileLockStore {
    async fn read(&self, key: &LockKey) -> Result<Versioned<Queue>, StoreError> {
        let key = key.clone();
        self.with_shared(move |table| {
            table
                .records
                .iter()
                .find(|r| r.matches(&key))
                .map(|r| Versioned::new(r.owners.clone(), r.version))
                .unwrap_or_else(Versioned::absent)
        })
        .await
    }

    async fn write(
        &self,
        key: &LockKey,
        queue: &Queue,
        expected: Version,
    ) -> Result<Version, StoreError> {
        let key = key.clone();
        let queue = queue.clone();
        self.with_exclusive(move |table| {
            let index = table.records.iter().position(|r| r.matches(&key));
            let found = index
                .map(|i| table.records[i].version)
                .unwrap_or(Version::ABSENT);
            if found != expected {
                return Err(StoreError::Conflict {
                    key,
                    expected,
                    found,
                });
            }

            if queue.is_empty() {
                if let Some(i) = index {
                    table.records.remove(i);
                }
                return Ok(Version::ABSENT);
            }

            table.last_version = table.last_version.next();
            let version = table.last_version;
            let record = Record {
                team: key.team,
                channel: key.channel,
                resource: key.resource,
                owners: queue,
                version,
            };
            match index {
                Some(i) => table.records[i] = record,
                None => table.records.push(record),
            }
            Ok(version)
        })
        .await
    }

    async fn list_by_scope(&self, scope: &Scope) -> Result<BTreeMap<String, Queue>, StoreError> {
        let scope = scope.clone();
        self.with_shared(move |table| {
            table
                .records
                .iter()
                .filter(|r| {
                    r.team == scope.team && r.channel == scope.channel && !r.owners.is_empty()
                })
                .map(|r| (r.resource.clone(), r.owners.clone()))
                .collect()
        })
        .await
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
