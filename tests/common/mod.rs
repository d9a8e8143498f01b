//! Common test utilities for dotpad integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's `~/.config/dotpad/config.toml`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated working directory and config file.
///
/// The `dotpad()` method returns a `Command` that points `DOTPAD_CONFIG` at
/// a config file inside the temp dir, making tests parallel-safe and
/// independent of the host's real config.
pub struct TestEnv {
    pub dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with an empty (all-defaults) config.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();
        Self { dir, config_path }
    }

    /// Replace the environment's config file contents.
    pub fn write_config(&self, contents: &str) {
        fs::write(&self.config_path, contents).unwrap();
    }

    /// Write a DOT file into the environment and return its path.
    pub fn write_dot(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Get a Command for the dotpad binary with the isolated config.
    pub fn dotpad(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dotpad"));
        cmd.current_dir(self.dir.path());
        cmd.env("DOTPAD_CONFIG", &self.config_path);
        cmd
    }

    /// Get the path to the working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
