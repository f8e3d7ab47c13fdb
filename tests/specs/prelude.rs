//! Shared helpers for CLI specs

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// An isolated Lockbot state directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the state directory
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// `lb` as `user` in team `T`, channel `C`
    pub fn lb(&self, user: &str) -> Lb {
        let mut cmd = Command::cargo_bin("lb").unwrap();
        cmd.env_remove("LOCKBOT_CONFIG")
            .env_remove("RUST_LOG")
            .env("LOCKBOT_STATE_DIR", self.path())
            .env("LOCKBOT_TEAM", "T")
            .env("LOCKBOT_CHANNEL", "C")
            .env("USER", user);
        Lb { cmd }
    }
}

pub struct Lb {
    cmd: Command,
}

impl Lb {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        Run::from(output)
    }

    pub fn fails(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        assert!(
            !output.status.success(),
            "expected failure\nstdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        Run::from(output)
    }
}

pub struct Run {
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Run {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "stdout missing {:?}\nstdout: {}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).not().eval(&self.stdout),
            "stdout unexpectedly has {:?}\nstdout: {}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "stderr missing {:?}\nstderr: {}",
            needle,
            self.stderr
        );
        self
    }
}
