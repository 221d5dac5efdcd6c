//! Session key management.
//!
//! Guarantees a single long-lived 256-bit key in the secret store. The
//! key is re-fetched through the presence gate on every use and never
//! cached here; holding decrypted key material between operations would
//! defeat the per-use challenge.

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::KEY_LEN;
use crate::core::store::{PutOutcome, SecretStore};
use crate::core::types::SecretId;
use crate::error::{CipherError, Result, StoreError};

/// Ensures the session encryption key exists and hands it out per use.
pub struct KeyVault<'a> {
    store: &'a SecretStore,
}

impl<'a> KeyVault<'a> {
    pub fn new(store: &'a SecretStore) -> Self {
        Self { store }
    }

    /// Fetch the session key, creating it on first use.
    ///
    /// The create path publishes the fresh key with a create-if-absent
    /// write: when two callers race, exactly one key is kept and the
    /// loser re-reads it, so data sealed by either caller stays
    /// readable. A declined presence check surfaces as
    /// [`StoreError::AccessDenied`].
    pub fn ensure_key(&self, reason: &str) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let id = SecretId::session_key();

        if let Some(existing) = self.store.get(&id, reason)? {
            return as_key(&existing);
        }

        let mut fresh = Zeroizing::new([0u8; KEY_LEN]);
        rand::thread_rng().fill_bytes(fresh.as_mut());
        debug!(fingerprint = %fingerprint(fresh.as_ref()), "generated session key candidate");

        match self.store.put_if_absent(&id, fresh.as_ref(), true)? {
            PutOutcome::Created => {
                info!(fingerprint = %fingerprint(fresh.as_ref()), "session key created");
                Ok(fresh)
            }
            PutOutcome::AlreadyExists => {
                // Lost the race; the winner's key is the real one.
                debug!("session key created concurrently, re-reading");
                let winner = self
                    .store
                    .get(&id, reason)?
                    .ok_or(StoreError::AccessDenied)?;
                as_key(&winner)
            }
        }
    }

    /// Whether a session key exists, without running a challenge.
    pub fn has_key(&self) -> Result<bool> {
        self.store.contains(&SecretId::session_key())
    }

    /// Delete the session key. Any blob sealed under it becomes
    /// unreadable.
    pub fn delete_key(&self) -> Result<bool> {
        self.store.delete(&SecretId::session_key())
    }
}

fn as_key(bytes: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if bytes.len() != KEY_LEN {
        return Err(CipherError::KeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        }
        .into());
    }
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(bytes);
    Ok(key)
}

/// Short SHA-256 fingerprint for logging; never the key itself.
fn fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex_prefix(&digest, 8)
}

fn hex_prefix(bytes: &[u8], len: usize) -> String {
    bytes
        .iter()
        .take(len)
        .map(|b| format!("{:02x}", b))
        .collect()
}
