//! Help specs
//!
//! Verify usage text for commands invoked without a resource.

use crate::prelude::*;

#[test]
fn lb_help_lists_commands() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["--help"])
        .passes()
        .stdout_has("lock")
        .stdout_has("unlock")
        .stdout_has("locks")
        .stdout_has("token");
}

#[test]
fn lock_without_resource_shows_usage() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["lock"])
        .passes()
        .stdout_has("[you] How to use `/lock`");
}

#[test]
fn unlock_help_shows_usage() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["unlock", "help"])
        .passes()
        .stdout_has("[you] How to use `/unlock`");
}
