//! Durable secret storage.
//!
//! Secrets live in a platform backend behind the [`StoreBackend`] trait;
//! the [`SecretStore`] front serializes record envelopes and enforces the
//! presence gate for gated entries. Nothing is cached: every access
//! round-trips through the backend.
//!
//! ## Adding a new storage backend
//!
//! 1. Implement the `StoreBackend` trait
//! 2. Add the implementation in a new file (e.g., `cloud.rs`)
//! 3. Wire it into `default_backend`

use std::sync::Arc;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::gate::PresenceGate;
use crate::core::types::{validate_account, SecretId, StoredSecret};
use crate::error::{Result, StoreError};

mod fs;
mod memory;

#[cfg(target_os = "macos")]
pub mod keychain;

pub use fs::Filesystem;
pub use memory::Memory;

/// Outcome of a create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// This caller created the entry.
    Created,
    /// Another writer got there first; the existing entry was kept.
    AlreadyExists,
}

/// Raw storage operations over opaque record bytes.
///
/// Backends know nothing about gating or record structure; they store
/// and return the serialized envelope under a qualified name.
pub trait StoreBackend: Send + Sync {
    /// Store `data` under `name`, replacing any existing entry.
    fn write(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Store `data` under `name` only if no entry exists.
    ///
    /// The check and the write are atomic with respect to other callers
    /// of the same backend.
    fn write_if_absent(&self, name: &str, data: &[u8]) -> Result<PutOutcome>;

    /// Read the entry under `name`, or `None` if absent.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Remove the entry under `name`. Absence is not an error.
    ///
    /// Returns `true` if an entry was removed.
    fn remove(&self, name: &str) -> Result<bool>;

    /// Short backend label for status output and logs.
    fn label(&self) -> &'static str;
}

/// Select the storage backend for this platform.
///
/// On macOS: Keychain, unless `HOLT_NO_KEYCHAIN=1`.
/// Other platforms: filesystem records under the data dir.
/// `HOLT_STORE=fs` forces the filesystem backend anywhere;
/// `HOLT_STORE=memory` selects the throwaway in-memory backend.
pub fn default_backend() -> Result<Box<dyn StoreBackend>> {
    match std::env::var(constants::ENV_STORE).ok().as_deref() {
        Some("memory") => {
            info!("using in-memory store backend (HOLT_STORE=memory)");
            return Ok(Box::new(Memory::new()));
        }
        Some("fs") => {
            info!("using filesystem store backend (HOLT_STORE=fs)");
            return Ok(Box::new(Filesystem::open_default()?));
        }
        _ => {}
    }

    #[cfg(target_os = "macos")]
    {
        if std::env::var(constants::ENV_NO_KEYCHAIN).is_err() {
            info!("using macOS Keychain store backend");
            return Ok(Box::new(keychain::Keychain::new()));
        }
        info!("using filesystem store backend (HOLT_NO_KEYCHAIN=1)");
    }

    Ok(Box::new(Filesystem::open_default()?))
}

/// Gated secret store.
///
/// Wraps a backend with the record envelope and the presence policy.
/// Both collaborators are injected; tests combine the [`Memory`] backend
/// with scripted gates.
pub struct SecretStore {
    backend: Box<dyn StoreBackend>,
    gate: Arc<dyn PresenceGate>,
}

impl SecretStore {
    /// Build a store over an explicit backend and gate.
    pub fn new(backend: Box<dyn StoreBackend>, gate: Arc<dyn PresenceGate>) -> Self {
        Self { backend, gate }
    }

    /// Build a store over the platform default backend.
    pub fn open_default(gate: Arc<dyn PresenceGate>) -> Result<Self> {
        Ok(Self::new(default_backend()?, gate))
    }

    /// Backend label for status output.
    pub fn backend_label(&self) -> &'static str {
        self.backend.label()
    }

    /// Store a secret, replacing any existing entry for the same id.
    ///
    /// `gated` marks the record as requiring a presence check at read
    /// time. Overwrites are last-write-wins; the previous entry is gone.
    pub fn put(&self, id: &SecretId, value: &[u8], gated: bool) -> Result<()> {
        validate_account(&id.account)?;
        let name = id.storage_name();
        debug!(name = %name, gated, "storing secret");

        let record = StoredSecret::new(value, gated);
        let data = encode_record(&name, &record)?;
        // Replace semantics: drop any prior entry first so backends that
        // reject duplicate names (keychain) behave like the rest.
        self.backend.remove(&name)?;
        self.backend.write(&name, &data)
    }

    /// Store a secret only if no entry exists for the id.
    ///
    /// The caller that loses the race gets `AlreadyExists` and must
    /// re-read; the stored entry is never silently replaced.
    pub fn put_if_absent(&self, id: &SecretId, value: &[u8], gated: bool) -> Result<PutOutcome> {
        validate_account(&id.account)?;
        let name = id.storage_name();
        debug!(name = %name, gated, "storing secret if absent");

        let record = StoredSecret::new(value, gated);
        let data = encode_record(&name, &record)?;
        self.backend.write_if_absent(&name, &data)
    }

    /// Fetch a secret value.
    ///
    /// Ungated entries return immediately. Gated entries first run the
    /// presence challenge with `reason`; a declined challenge is
    /// [`StoreError::AccessDenied`], an absent entry is `Ok(None)`.
    pub fn get(&self, id: &SecretId, reason: &str) -> Result<Option<Zeroizing<Vec<u8>>>> {
        validate_account(&id.account)?;
        let name = id.storage_name();
        let Some(data) = self.backend.read(&name)? else {
            debug!(name = %name, "secret not found");
            return Ok(None);
        };

        let record = decode_record(&name, &data)?;
        if record.gated {
            debug!(name = %name, "presence check required");
            if !self.gate.confirm(reason)? {
                info!(name = %name, "presence check declined");
                return Err(StoreError::AccessDenied.into());
            }
        }

        Ok(Some(Zeroizing::new(record.value)))
    }

    /// Whether an entry exists for the id.
    ///
    /// Reveals presence only, never the value, so no challenge runs.
    pub fn contains(&self, id: &SecretId) -> Result<bool> {
        validate_account(&id.account)?;
        Ok(self.backend.read(&id.storage_name())?.is_some())
    }

    /// Delete a secret. Idempotent: absence is `Ok(false)`.
    pub fn delete(&self, id: &SecretId) -> Result<bool> {
        validate_account(&id.account)?;
        let name = id.storage_name();
        let removed = self.backend.remove(&name)?;
        debug!(name = %name, removed, "deleted secret");
        Ok(removed)
    }
}

fn encode_record(name: &str, record: &StoredSecret) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| {
        StoreError::InvalidRecord {
            name: name.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn decode_record(name: &str, data: &[u8]) -> Result<StoredSecret> {
    serde_json::from_slice(data).map_err(|e| {
        StoreError::InvalidRecord {
            name: name.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
