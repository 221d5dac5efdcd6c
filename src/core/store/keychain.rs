//! macOS Keychain store backend.
//!
//! Stores record envelopes as generic passwords. The presence policy is
//! enforced by the store front from the record's gating flag, so entries
//! here carry no SecAccessControl of their own.

#![cfg(target_os = "macos")]

use std::sync::Mutex;

use tracing::{debug, error};

use super::{PutOutcome, StoreBackend};
use crate::error::{Result, StoreError};

/// User cancelled an authorization dialog (errSecAuthFailed family).
const ERR_SEC_USER_CANCELED: i32 = -128;

/// Item not found (errSecItemNotFound).
const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;

// The Security framework has no native create-if-absent for generic
// passwords, so write_if_absent serializes probe+add behind this lock.
// The guarantee is process-local; see the module docs in keyvault.
static CREATE_LOCK: Mutex<()> = Mutex::new(());

/// Keychain-backed secret records.
pub struct Keychain {
    service: String,
}

impl Keychain {
    /// Service name for all holt entries in the Keychain.
    const SERVICE_NAME: &'static str = "com.holt.vault";

    pub fn new() -> Self {
        Self {
            service: Self::SERVICE_NAME.to_string(),
        }
    }

    fn map_error(&self, op: &str, name: &str, e: security_framework::base::Error) -> StoreError {
        let code = e.code();
        if code == ERR_SEC_USER_CANCELED {
            error!(name, op, "keychain access cancelled by user");
            StoreError::AccessDenied
        } else {
            error!(name, op, code, "keychain operation failed");
            StoreError::Fault {
                code,
                message: format!("{}: {}", op, e),
            }
        }
    }
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for Keychain {
    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        use security_framework::passwords::set_generic_password;

        debug!(name, service = %self.service, "storing keychain entry");
        set_generic_password(&self.service, name, data)
            .map_err(|e| self.map_error("store", name, e))?;
        Ok(())
    }

    fn write_if_absent(&self, name: &str, data: &[u8]) -> Result<PutOutcome> {
        let _guard = CREATE_LOCK.lock().map_err(|_| StoreError::Fault {
            code: 0,
            message: "keychain create lock poisoned".to_string(),
        })?;

        if self.read(name)?.is_some() {
            debug!(name, "keychain entry already present, keeping existing");
            return Ok(PutOutcome::AlreadyExists);
        }
        self.write(name, data)?;
        Ok(PutOutcome::Created)
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        use security_framework::passwords::get_generic_password;

        match get_generic_password(&self.service, name) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => {
                debug!(name, "keychain entry not found");
                Ok(None)
            }
            Err(e) => Err(self.map_error("read", name, e).into()),
        }
    }

    fn remove(&self, name: &str) -> Result<bool> {
        use security_framework::passwords::delete_generic_password;

        match delete_generic_password(&self.service, name) {
            Ok(()) => {
                debug!(name, "deleted keychain entry");
                Ok(true)
            }
            Err(e) if e.code() == ERR_SEC_ITEM_NOT_FOUND => Ok(false),
            Err(e) => Err(self.map_error("delete", name, e).into()),
        }
    }

    fn label(&self) -> &'static str {
        "keychain"
    }
}
