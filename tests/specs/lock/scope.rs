//! Scope specs
//!
//! Verify locks are isolated per team and channel.

use crate::prelude::*;

#[test]
fn locks_do_not_leak_across_channels() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "dev"]).passes();

    temp.lb("bob")
        .env("LOCKBOT_CHANNEL", "other")
        .args(&["lock", "dev"])
        .passes()
        .stdout_has("[channel] <@bob> has locked `dev` 🔒")
        .stdout_lacks("alice");
    temp.lb("bob")
        .env("LOCKBOT_CHANNEL", "other")
        .args(&["locks"])
        .passes()
        .stdout_lacks("alice");
}

#[test]
fn locks_do_not_leak_across_teams() {
    let temp = Project::empty();
    temp.lb("alice").args(&["lock", "dev"]).passes();

    temp.lb("bob")
        .args(&["--team", "U", "locks"])
        .passes()
        .stdout_has("[you] No active locks in this channel 🔓");
}
