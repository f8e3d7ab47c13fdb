// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lb_core::{Clock, OwnerEntry, QueueInput, SystemClock};

fn key(team: &str, channel: &str, resource: &str) -> LockKey {
    LockKey::new(team, channel, resource).unwrap()
}

fn queue_of(names: &[&str]) -> Queue {
    let now = SystemClock.now();
    Queue::from_entries(names.iter().map(|n| OwnerEntry::new(*n, now)))
}

#[tokio::test]
async fn missing_table_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();

    let read = store.read(&key("T", "C", "dev")).await.unwrap();
    assert_eq!(read, Versioned::absent());
    assert!(store
        .list_by_scope(&Scope::new("T", "C").unwrap())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn writes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let k = key("T", "C", "dev");

    let version = {
        let store = JsonFileLockStore::open(dir.path()).unwrap();
        store
            .write(&k, &queue_of(&["alice", "bob"]), Version::ABSENT)
            .await
            .unwrap()
    };

    let reopened = JsonFileLockStore::open(dir.path()).unwrap();
    let read = reopened.read(&k).await.unwrap();
    assert_eq!(read.version, version);
    assert_eq!(read.value.names(), vec!["alice", "bob"]);
}

#[tokio::test]
async fn stale_write_conflicts_and_leaves_table_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();
    let k = key("T", "C", "dev");

    store
        .write(&k, &queue_of(&["alice"]), Version::ABSENT)
        .await
        .unwrap();
    let before = std::fs::read_to_string(store.table_path()).unwrap();

    let err = store
        .write(&k, &queue_of(&["bob"]), Version::ABSENT)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict { found, .. } if found != Version::ABSENT));
    assert_eq!(std::fs::read_to_string(store.table_path()).unwrap(), before);
}

#[tokio::test]
async fn empty_write_removes_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();
    let k = key("T", "C", "dev");

    let v1 = store
        .write(&k, &queue_of(&["alice"]), Version::ABSENT)
        .await
        .unwrap();
    store.delete_or_clear(&k, v1).await.unwrap();

    assert_eq!(store.read(&k).await.unwrap(), Versioned::absent());
    let json = std::fs::read_to_string(store.table_path()).unwrap();
    assert!(!json.contains("alice"));
}

#[tokio::test]
async fn table_layout_keeps_scope_fields_separate() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();

    store
        .write(&key("a#b", "c", "dev"), &queue_of(&["alice"]), Version::ABSENT)
        .await
        .unwrap();
    store
        .write(&key("a", "b#c", "dev"), &queue_of(&["bob"]), Version::ABSENT)
        .await
        .unwrap();

    let first = store
        .list_by_scope(&Scope::new("a#b", "c").unwrap())
        .await
        .unwrap();
    let second = store
        .list_by_scope(&Scope::new("a", "b#c").unwrap())
        .await
        .unwrap();
    assert_eq!(first["dev"].names(), vec!["alice"]);
    assert_eq!(second["dev"].names(), vec!["bob"]);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.table_path()).unwrap()).unwrap();
    let record = &json["records"][0];
    assert_eq!(record["team"], "a#b");
    assert_eq!(record["owners"][0]["name"], "alice");
    assert!(record["owners"][0]["joinedAt"].is_string());
}

#[tokio::test]
async fn concurrent_writers_on_one_version_have_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();
    let k = key("T", "C", "dev");

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let k = k.clone();
        handles.push(tokio::spawn(async move {
            let name = format!("user-{i}");
            store
                .write(&k, &queue_of(&[name.as_str()]), Version::ABSENT)
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(e) => assert!(e.is_conflict(), "unexpected error: {e}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(store.read(&k).await.unwrap().value.len(), 1);
}

#[tokio::test]
async fn corrupt_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();
    std::fs::write(store.table_path(), "{ not json").unwrap();

    let err = store.read(&key("T", "C", "dev")).await.unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[tokio::test]
async fn hand_edited_duplicates_load_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileLockStore::open(dir.path()).unwrap();
    std::fs::write(
        store.table_path(),
        r#"{
  "last_version": 3,
  "records": [
    {
      "team": "T",
      "channel": "C",
      "resource": "dev",
      "owners": [
        {"name": "alice", "joinedAt": "2026-01-02T03:04:05Z"},
        {"name": "bob", "joinedAt": "2026-01-02T03:04:06Z"},
        {"name": "alice", "joinedAt": "2026-01-02T03:04:07Z"}
      ],
      "version": 3
    }
  ]
}"#,
    )
    .unwrap();
    let k = key("T", "C", "dev");

    let read = store.read(&k).await.unwrap();
    assert_eq!(read.version, Version(3));
    assert_eq!(read.value.names(), vec!["alice", "bob"]);

    let (next, _) = read
        .value
        .transition(QueueInput::Leave { name: "alice".to_string() }, &SystemClock);
    store.write(&k, &next, read.version).await.unwrap();
    let after = store.read(&k).await.unwrap();
    assert_eq!(after.value.names(), vec!["bob"]);
    assert_eq!(after.version, Version(4));
}
