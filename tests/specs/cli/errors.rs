//! CLI error specs
//!
//! Verify failures exit non-zero with a readable message.

use crate::prelude::*;

#[test]
fn missing_channel_fails() {
    let temp = Project::empty();
    temp.lb("alice")
        .env_remove("LOCKBOT_CHANNEL")
        .args(&["lock", "dev"])
        .fails()
        .stderr_has("no channel given");
}

#[test]
fn unreadable_config_fails() {
    let temp = Project::empty();
    temp.lb("alice")
        .args(&["--config", "/nonexistent/lockbot.toml", "locks"])
        .fails()
        .stderr_has("failed to load config");
}

#[test]
fn zero_attempts_config_is_rejected() {
    let temp = Project::empty();
    temp.file("lockbot.toml", "[waitlist]\nmax_attempts = 0\n");
    let config = temp.path().join("lockbot.toml");
    temp.lb("alice")
        .args(&["--config", config.to_str().unwrap(), "locks"])
        .fails()
        .stderr_has("failed to load config");
}

#[test]
fn unknown_unlock_mode_is_rejected() {
    let temp = Project::empty();
    temp.lb("alice").args(&["unlock", "dev", "now"]).fails();
}
