//! Waitlist specs
//!
//! Verify lock, unlock and locks across separate invocations.

use crate::prelude::*;

#[test]
fn first_lock_is_announced() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["lock", "dev"])
        .passes()
        .stdout_has("[channel] <@alice> has locked `dev` 🔒");
}

#[test]
fn lock_unlock_scenario() {
    let temp = Project::empty();

    temp.lb("alice").args(&["lock", "dev"]).passes();
    temp.lb("bob")
        .args(&["lock", "dev"])
        .passes()
        .stdout_has("[channel] <@alice> has locked `dev` 🔒, with <@bob> waiting in line");
    temp.lb("alice")
        .args(&["lock", "dev"])
        .passes()
        .stdout_has("[you] You are already in line for `dev`");
    temp.lb("alice")
        .args(&["unlock", "dev"])
        .passes()
        .stdout_has("[channel] <@alice> has unlocked `dev` 🔓")
        .stdout_has("<@bob> now holds `dev`");
    temp.lb("alice")
        .args(&["locks"])
        .passes()
        .stdout_has("[you] Active locks in this channel:")
        .stdout_has("`dev` is locked by <@bob>")
        .stdout_lacks("waiting");
}

#[test]
fn waiter_can_leave_the_line() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "dev"]).passes();
    temp.lb("bob").args(&["lock", "dev"]).passes();

    temp.lb("bob")
        .args(&["unlock", "dev"])
        .passes()
        .stdout_has("[channel] <@bob> has left the line for `dev`");
    temp.lb("bob")
        .args(&["locks"])
        .passes()
        .stdout_has("`dev` is locked by <@alice>")
        .stdout_lacks("waiting");
}

#[test]
fn stranger_cannot_unlock() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "dev"]).passes();

    temp.lb("mallory")
        .args(&["unlock", "dev"])
        .passes()
        .stdout_has("[you] Cannot unlock `dev`, locked by <@alice> 🔒");
}

#[test]
fn unlocking_a_free_resource_is_private() {
    let temp = Project::empty();
    let run = temp.lb("alice").args(&["unlock", "dev"]).passes();
    similar_asserts::assert_eq!(run.stdout(), "[you] `dev` is already unlocked 🔓\n");
}

#[test]
fn locks_lists_resources_sorted_with_waiters() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "web"]).passes();
    temp.lb("bob").args(&["lock", "api"]).passes();
    temp.lb("carol").args(&["lock", "api"]).passes();

    let run = temp.lb("alice").args(&["locks"]).passes();
    let out = run.stdout();
    let api = out.find("`api`").unwrap();
    let web = out.find("`web`").unwrap();
    assert!(api < web, "resources not sorted:\n{}", out);
    assert!(out.contains("(1 waiting)"));
}

#[test]
fn json_output_carries_destination() {
    let temp = Project::empty();
    let run = temp
        .lb("alice")
        .args(&["--format", "json", "lock", "dev"])
        .passes();
    let value: serde_json::Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(value["destination"], "channel");
}
