//! Configuration file management.
//!
//! Reads `config.toml` from the platform config dir. Everything has a
//! default; a missing file is not an error, a malformed one is.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::probe;
use crate::error::{ConfigError, Result};

/// User configuration stored in `<config-dir>/holt/config.toml`.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub downloader: DownloaderConfig,
    pub probe: ProbeConfig,
    pub vault: VaultConfig,
}

/// Downloader invocation settings.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DownloaderConfig {
    /// Absolute path to the downloader. When unset, resolved on PATH.
    pub binary: Option<PathBuf>,
}

/// Login probe settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// URL fetched with `--simulate` when testing credentials.
    pub url: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_PROBE_URL.to_string(),
        }
    }
}

/// Vault layout settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Primary credential account id.
    pub account: String,
    /// Override for the app data directory (cookie jar location).
    pub data_dir: Option<PathBuf>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            account: constants::DEFAULT_ACCOUNT.to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(constants::APP_DIR).join(constants::CONFIG_FILE))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path. Tests use this with a tempdir.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            account = %config.vault.account,
            has_binary_override = config.downloader.binary.is_some(),
            "config loaded"
        );
        Ok(config)
    }

    /// Resolve the downloader binary: the configured override, else a
    /// PATH lookup.
    pub fn downloader_binary(&self) -> Result<PathBuf> {
        match &self.downloader.binary {
            Some(path) => Ok(path.clone()),
            None => probe::find_downloader(),
        }
    }

    /// App data directory for the cookie jar.
    pub fn app_data_dir(&self) -> Result<PathBuf> {
        match &self.vault.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let data = dirs::data_dir().ok_or(crate::error::JarError::NoDataDir)?;
                Ok(data.join(constants::APP_DIR))
            }
        }
    }
}
