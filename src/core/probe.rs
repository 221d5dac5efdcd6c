//! Login validation against the external downloader.
//!
//! The vault never decides what "valid credentials" means; it hands a
//! staged pair to a [`LoginProbe`] and acts on the verdict. The shipped
//! probe drives the downloader in simulate mode and reads a structured
//! success signal from its output.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ProbeError, Result};

/// Result of probing a credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// The external check accepted the credentials.
    Pass,
    /// The external check rejected them.
    Fail { reason: String },
}

/// External credential validation.
///
/// Implementations own their timeout and cancellation behavior; `check`
/// blocks until a verdict exists. Errors mean the probe infrastructure
/// failed, not that the credentials were rejected.
pub trait LoginProbe {
    fn check(&self, username: &str, password: &str) -> Result<ProbeVerdict>;
}

/// Probe that runs the downloader with `--simulate` against a known URL.
///
/// Success requires a clean exit plus a success marker on the merged
/// output: either the `HOLT_LOGIN_OK` line printed by wrapper scripts or
/// the legacy "login successful" phrase older wrappers emit. Exit status
/// alone is not trusted; some downloaders exit zero on throttled or
/// anonymous fetches.
pub struct DownloaderProbe {
    binary: PathBuf,
    url: String,
}

impl DownloaderProbe {
    pub fn new(binary: PathBuf, url: impl Into<String>) -> Self {
        Self {
            binary,
            url: url.into(),
        }
    }

    /// Build from config: honor the binary override, else resolve the
    /// downloader on PATH.
    pub fn from_config(config: &Config) -> Result<Self> {
        let binary = config.downloader_binary()?;
        Ok(Self::new(binary, config.probe.url.clone()))
    }
}

impl LoginProbe for DownloaderProbe {
    fn check(&self, username: &str, password: &str) -> Result<ProbeVerdict> {
        info!(binary = %self.binary.display(), url = %self.url, "probing credentials");

        let output = Command::new(&self.binary)
            .arg("--username")
            .arg(username)
            .arg("--password")
            .arg(password)
            .arg("--simulate")
            .arg(&self.url)
            .output()
            .map_err(ProbeError::Spawn)?;

        // The wrapper may print on either stream; scan both.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let marker = contains_marker(&stdout) || contains_marker(&stderr);

        debug!(
            status = %output.status,
            marker,
            "probe finished"
        );

        if output.status.success() && marker {
            return Ok(ProbeVerdict::Pass);
        }

        let reason = if !output.status.success() {
            format!("downloader exited with {}", output.status)
        } else {
            "downloader exited cleanly but did not confirm the login".to_string()
        };
        Ok(ProbeVerdict::Fail { reason })
    }
}

fn contains_marker(text: &str) -> bool {
    text.contains(constants::LOGIN_OK_MARKER) || text.contains(constants::LOGIN_OK_LEGACY)
}

/// Locate the downloader on PATH.
pub fn find_downloader() -> Result<PathBuf> {
    which::which(constants::DOWNLOADER_BIN)
        .map_err(|_| ProbeError::DownloaderNotFound(constants::DOWNLOADER_BIN.to_string()).into())
}
