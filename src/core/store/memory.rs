//! In-memory store backend.
//!
//! Holds records in a shared map. Nothing survives the process; used by
//! tests and `HOLT_STORE=memory` smoke runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{PutOutcome, StoreBackend};
use crate::error::{Result, StoreError};

/// Throwaway in-memory records. Clones share the same map.
#[derive(Clone, Default)]
pub struct Memory {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries.lock().map_err(|_| {
            StoreError::Fault {
                code: 0,
                message: "memory store lock poisoned".to_string(),
            }
            .into()
        })
    }
}

impl StoreBackend for Memory {
    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        self.lock()?.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn write_if_absent(&self, name: &str, data: &[u8]) -> Result<PutOutcome> {
        let mut entries = self.lock()?;
        if entries.contains_key(name) {
            return Ok(PutOutcome::AlreadyExists);
        }
        entries.insert(name.to_string(), data.to_vec());
        Ok(PutOutcome::Created)
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(name).cloned())
    }

    fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.remove(name).is_some())
    }

    fn label(&self) -> &'static str {
        "memory"
    }
}
