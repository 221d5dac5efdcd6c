//! Error types for the holt vault.
//!
//! Each subsystem has its own error enum; the top-level [`Error`] wraps
//! them transparently so call sites can use `?` across layer boundaries
//! while the binary still matches on specific failures.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Jar(#[from] JarError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Txn(#[from] TxnError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Secret store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The presence check was declined or could not be completed.
    #[error("access denied: presence check was not approved")]
    AccessDenied,

    /// The underlying secure storage reported a failure.
    #[error("secret store failure (status {code}): {message}")]
    Fault { code: i32, message: String },

    /// A stored record could not be decoded.
    #[error("malformed secret record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },

    /// An account or secret name failed validation.
    #[error("invalid secret name: {0}")]
    InvalidName(String),
}

/// AEAD seal/open failures.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Authentication failed: the blob is corrupted, truncated, or was
    /// sealed under a different key. No plaintext is ever returned.
    #[error("integrity check failed: data is corrupted or sealed under a different key")]
    Integrity,

    /// A key of the wrong size was supplied.
    #[error("encryption key must be {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    /// The AEAD primitive itself failed while sealing.
    #[error("seal failed: {0}")]
    Seal(String),
}

/// Cookie jar filesystem failures.
#[derive(Error, Debug)]
pub enum JarError {
    #[error("unable to determine the data directory for this platform")]
    NoDataDir,

    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read import source {path}: {source}")]
    ImportSource {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Login probe failures (the probe itself, not a failed login).
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("downloader not found: {0}")]
    DownloaderNotFound(String),

    #[error("failed to run downloader: {0}")]
    Spawn(std::io::Error),
}

/// Credential transaction misuse and conflicts.
#[derive(Error, Debug)]
pub enum TxnError {
    #[error("a credential test is already in progress for account '{0}'")]
    InFlight(String),

    #[error("transaction is not in the staged phase")]
    NotStaged,
}

/// Configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine the config directory for this platform")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    Read(std::io::Error),

    #[error("invalid config: {0}")]
    Parse(toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
