//! Credential account management.
//!
//! A credential is two store entries sharing an account id: the username
//! (readable without a challenge) and the password (gated). A pair only
//! counts as present when both entries resolve.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::store::SecretStore;
use crate::core::types::{validate_account, Credential, SecretId};
use crate::error::{Error, Result, StoreError};

/// Interactive credential entry.
///
/// `ensure_credentials` delegates here when no stored pair exists.
/// Returning `None` means the user declined to provide credentials.
pub trait CredentialPrompt {
    fn request(&self, account: &str) -> Result<Option<Credential>>;
}

/// CRUD over credential accounts.
pub struct CredentialManager<'a> {
    store: &'a SecretStore,
}

impl<'a> CredentialManager<'a> {
    pub fn new(store: &'a SecretStore) -> Self {
        Self { store }
    }

    /// Store a username/password pair for an account.
    ///
    /// Writes the username ungated, then the password gated. If the
    /// password write fails, the entries this call already wrote are
    /// deleted so the store never holds a half pair. A pre-existing pair
    /// that this call overwrote is not resurrected; callers that need a
    /// restorable baseline use a [`CredentialTransaction`].
    ///
    /// [`CredentialTransaction`]: crate::core::txn::CredentialTransaction
    pub fn set_credentials(&self, account: &str, username: &str, password: &str) -> Result<()> {
        validate_account(account)?;
        debug!(account, "storing credentials");

        let mut written: Vec<SecretId> = Vec::new();

        let username_id = SecretId::username(account);
        self.store.put(&username_id, username.as_bytes(), false)?;
        written.push(username_id);

        let password_id = SecretId::password(account);
        if let Err(e) = self.store.put(&password_id, password.as_bytes(), true) {
            warn!(account, "password write failed, undoing partial pair");
            for id in &written {
                if let Err(undo_err) = self.store.delete(id) {
                    warn!(entry = %id, error = %undo_err, "undo delete failed");
                }
            }
            return Err(e);
        }

        info!(account, "credentials stored");
        Ok(())
    }

    /// Fetch the credential pair for an account.
    ///
    /// `None` unless both entries resolve. A declined presence check is
    /// folded into `None` here: for callers this reads as "not logged
    /// in". Use [`get_credentials_strict`] where a denial must abort.
    ///
    /// [`get_credentials_strict`]: Self::get_credentials_strict
    pub fn get_credentials(&self, account: &str, reason: &str) -> Result<Option<Credential>> {
        match self.get_credentials_strict(account, reason) {
            Ok(pair) => Ok(pair),
            Err(Error::Store(StoreError::AccessDenied)) => {
                debug!(account, "presence check declined, treating as absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the credential pair, propagating a declined presence check
    /// as [`StoreError::AccessDenied`].
    pub fn get_credentials_strict(&self, account: &str, reason: &str) -> Result<Option<Credential>> {
        let Some(username) = self.store.get(&SecretId::username(account), reason)? else {
            return Ok(None);
        };
        let Some(password) = self.store.get(&SecretId::password(account), reason)? else {
            // Half a pair is not a credential.
            debug!(account, "username present but password missing");
            return Ok(None);
        };

        Ok(Some(Credential {
            username: utf8(&SecretId::username(account), &username)?,
            password: Zeroizing::new(utf8(&SecretId::password(account), &password)?),
        }))
    }

    /// Delete both entries for an account.
    ///
    /// Idempotent; `true` if anything was removed. Store faults still
    /// propagate.
    pub fn delete_credentials(&self, account: &str) -> Result<bool> {
        let removed_username = self.store.delete(&SecretId::username(account))?;
        let removed_password = self.store.delete(&SecretId::password(account))?;
        let removed = removed_username || removed_password;
        info!(account, removed, "credentials deleted");
        Ok(removed)
    }

    /// Make sure credentials exist, prompting if they do not.
    ///
    /// `true` when usable credentials are in place afterwards; `false`
    /// when the user declined to provide any.
    pub fn ensure_credentials(
        &self,
        account: &str,
        reason: &str,
        prompt: &dyn CredentialPrompt,
    ) -> Result<bool> {
        if self.get_credentials(account, reason)?.is_some() {
            return Ok(true);
        }

        match prompt.request(account)? {
            Some(cred) => {
                self.set_credentials(account, &cred.username, &cred.password)?;
                Ok(true)
            }
            None => {
                debug!(account, "user declined to enter credentials");
                Ok(false)
            }
        }
    }

    /// Presence of the two entries, without running a challenge.
    pub fn entry_presence(&self, account: &str) -> Result<(bool, bool)> {
        Ok((
            self.store.contains(&SecretId::username(account))?,
            self.store.contains(&SecretId::password(account))?,
        ))
    }
}

fn utf8(id: &SecretId, bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        StoreError::InvalidRecord {
            name: id.storage_name(),
            reason: format!("not valid UTF-8: {}", e),
        }
        .into()
    })
}
