//! Test support utilities for holt integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own scratch dir and home dir. No process-global
/// state is mutated; child processes get their environment set
/// per-command, so tests can safely run in parallel.
pub struct Test {
    /// Scratch directory the command runs in
    pub dir: TempDir,
    /// Temporary home directory (store, config, and jar live under it)
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a stored login.
    pub fn with_login(username: &str, password: &str) -> Self {
        let t = Self::new();
        let output = t.login_set(None, username, password);
        assert!(
            output.status.success(),
            "failed to store login: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path of the config file inside the temp home.
    pub fn config_path(&self) -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            self.home
                .path()
                .join("Library/Application Support/holt/config.toml")
        }
        #[cfg(not(target_os = "macos"))]
        {
            self.home.path().join(".config/holt/config.toml")
        }
    }

    /// Path of the app data dir inside the temp home.
    pub fn data_dir(&self) -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            self.home.path().join("Library/Application Support/holt")
        }
        #[cfg(not(target_os = "macos"))]
        {
            self.home.path().join(".local/share/holt")
        }
    }

    /// Path of the encrypted cookie file inside the temp home.
    pub fn cookie_path(&self) -> PathBuf {
        self.data_dir().join("yt-cookies/cookies.enc")
    }

    /// Write a config file into the temp home.
    pub fn write_config(&self, contents: &str) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("failed to create config dir");
        std::fs::write(path, contents).expect("failed to write config");
    }
}
