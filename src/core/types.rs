//! Domain types for the vault.
//!
//! Secrets are addressed by a `(account, kind)` pair; the scope is fixed
//! per installation. Values never implement a printing `Debug`.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{Result, StoreError};

/// What a secret entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKind {
    /// Plain account username. Readable without a presence check.
    Username,
    /// Account password. Reads require a presence check.
    Password,
    /// The 256-bit session encryption key. Reads require a presence check.
    SymmetricKey,
}

/// Identifies at most one live secret in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretId {
    pub account: String,
    pub kind: SecretKind,
}

impl SecretId {
    /// Username entry for a credential account.
    pub fn username(account: &str) -> Self {
        Self {
            account: account.to_string(),
            kind: SecretKind::Username,
        }
    }

    /// Password entry for a credential account.
    pub fn password(account: &str) -> Self {
        Self {
            account: account.to_string(),
            kind: SecretKind::Password,
        }
    }

    /// The single session encryption key entry.
    pub fn session_key() -> Self {
        Self {
            account: constants::SESSION_KEY_NAME.to_string(),
            kind: SecretKind::SymmetricKey,
        }
    }

    /// Qualified name under which the entry is stored.
    ///
    /// Credential entries get a kind suffix so username and password for
    /// the same account never collide; the key entry keeps its bare name.
    pub fn storage_name(&self) -> String {
        match self.kind {
            SecretKind::Username => format!("{}{}", self.account, constants::USERNAME_SUFFIX),
            SecretKind::Password => format!("{}{}", self.account, constants::PASSWORD_SUFFIX),
            SecretKind::SymmetricKey => self.account.clone(),
        }
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_name())
    }
}

/// A complete username/password pair for one account.
///
/// Only materialized when both underlying secrets resolve.
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

// Never leak the password through Debug output or logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// On-disk/in-store record envelope for one secret.
///
/// Backends store these as opaque serialized bytes; the gating flag
/// travels with the value so every backend enforces the same policy.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSecret {
    /// Raw secret bytes.
    pub value: Vec<u8>,
    /// Whether reads must pass a presence check.
    pub gated: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl StoredSecret {
    pub fn new(value: &[u8], gated: bool) -> Self {
        Self {
            value: value.to_vec(),
            gated,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Validate an account name before it reaches a backend.
///
/// Accepts ASCII alphanumerics, `_`, and `-`, up to 128 characters.
/// Keeps filesystem backends path-safe and keychain entries greppable.
pub fn validate_account(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 128 {
        return Err(StoreError::InvalidName(name.to_string()).into());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StoreError::InvalidName(name.to_string()).into());
    }
    Ok(())
}
