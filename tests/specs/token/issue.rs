//! Token specs
//!
//! Verify API token issuance.

use crate::prelude::*;

#[test]
fn token_without_new_shows_usage() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["token"])
        .passes()
        .stdout_has("[you] How to use `/lbtoken`");
}

#[test]
fn token_new_persists_only_a_digest() {
    let temp = Project::empty();
    let run = temp.lb("alice").args(&["token", "new"]).passes();
    let out = run.stdout();
    assert!(out.starts_with("[you] "));
    assert!(out.contains("Authorization: Basic"));

    let stored = std::fs::read_to_string(temp.path().join("tokens.json")).unwrap();
    let token = out
        .split('`')
        .find(|s| s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap();
    assert!(!stored.contains(token));
}
