//! Staged credential replacement.
//!
//! Replacing working credentials with untested ones is the one
//! operation that can silently lock a user out, so it runs as a
//! transaction: snapshot the baseline, stage the new pair under a
//! separate account, validate externally, then commit or roll back.
//! The primary account is observably unchanged unless the probe passed.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::core::credentials::CredentialManager;
use crate::core::probe::{LoginProbe, ProbeVerdict};
use crate::core::types::Credential;
use crate::error::{Result, TxnError};

/// Presence-check reason for the baseline snapshot.
const BASELINE_REASON: &str = "snapshot the current login before testing new credentials";

/// Transaction lifecycle. Terminal phases never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Staged,
    Committed,
    RolledBack,
}

/// What the primary account held when the transaction began.
///
/// "Nothing" is a real snapshot value: rolling back to it deletes the
/// primary pair instead of leaving whatever the test wrote.
#[derive(Debug, Clone)]
pub enum Baseline {
    Absent,
    Present(Credential),
}

/// How a validated transaction ended.
#[derive(Debug)]
pub enum TxnOutcome {
    /// Probe passed; the staged pair is now the primary pair.
    Committed,
    /// Probe rejected the pair; the baseline was restored.
    RolledBack { reason: String },
}

/// In-process registry of accounts with a staged transaction.
///
/// `begin` claims the primary account and rejects a second transaction
/// until the first resolves. One registry per embedding; the CLI builds
/// one per invocation.
#[derive(Default)]
pub struct InFlight {
    staged: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&self, account: &str) -> Result<()> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| crate::error::Error::Other("transaction registry lock poisoned".to_string()))?;
        if !staged.insert(account.to_string()) {
            return Err(TxnError::InFlight(account.to_string()).into());
        }
        Ok(())
    }

    fn release(&self, account: &str) {
        if let Ok(mut staged) = self.staged.lock() {
            staged.remove(account);
        }
    }
}

/// One stage/validate/resolve cycle for a primary account.
pub struct CredentialTransaction<'a> {
    manager: &'a CredentialManager<'a>,
    registry: &'a InFlight,
    account: String,
    staged_account: String,
    staged: Credential,
    baseline: Baseline,
    phase: Phase,
}

// Manager and registry handles carry no printable state; the staged
// pair goes through Credential's redacting Debug.
impl fmt::Debug for CredentialTransaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialTransaction")
            .field("account", &self.account)
            .field("staged_account", &self.staged_account)
            .field("staged", &self.staged)
            .field("baseline", &self.baseline)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<'a> CredentialTransaction<'a> {
    /// Snapshot the baseline and stage the new pair.
    ///
    /// The baseline read is strict: a declined presence check aborts
    /// here rather than being mistaken for "no previous credentials".
    /// The staged pair is fully written under `staged_account` before
    /// this returns.
    pub fn begin(
        manager: &'a CredentialManager<'a>,
        registry: &'a InFlight,
        account: &str,
        staged_account: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        registry.claim(account)?;

        let result = (|| {
            let baseline = match manager.get_credentials_strict(account, BASELINE_REASON)? {
                Some(cred) => Baseline::Present(cred),
                None => Baseline::Absent,
            };
            debug!(
                account,
                had_baseline = matches!(baseline, Baseline::Present(_)),
                "baseline captured"
            );

            manager.set_credentials(staged_account, username, password)?;
            info!(account, staged_account, "credentials staged");
            Ok(baseline)
        })();

        match result {
            Ok(baseline) => Ok(Self {
                manager,
                registry,
                account: account.to_string(),
                staged_account: staged_account.to_string(),
                staged: Credential::new(username, password),
                baseline,
                phase: Phase::Staged,
            }),
            Err(e) => {
                registry.release(account);
                Err(e)
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Validate the staged pair and resolve the transaction.
    ///
    /// Nothing on the primary account changes until the probe returns.
    /// A probe verdict resolves the transaction either way; a probe
    /// infrastructure error rolls back first and then propagates.
    pub fn validate(&mut self, probe: &dyn LoginProbe) -> Result<TxnOutcome> {
        if self.phase != Phase::Staged {
            return Err(TxnError::NotStaged.into());
        }

        match probe.check(&self.staged.username, &self.staged.password) {
            Ok(ProbeVerdict::Pass) => {
                self.commit()?;
                Ok(TxnOutcome::Committed)
            }
            Ok(ProbeVerdict::Fail { reason }) => {
                info!(account = %self.account, reason, "probe rejected staged credentials");
                self.rollback()?;
                Ok(TxnOutcome::RolledBack { reason })
            }
            Err(e) => {
                warn!(account = %self.account, error = %e, "probe failed, rolling back");
                self.rollback()?;
                Err(e)
            }
        }
    }

    /// Copy the staged pair onto the primary account.
    ///
    /// The staged entry is left in place; it holds the same validated
    /// pair and the next transaction overwrites it.
    fn commit(&mut self) -> Result<()> {
        self.manager.set_credentials(
            &self.account,
            &self.staged.username,
            &self.staged.password,
        )?;
        self.phase = Phase::Committed;
        self.registry.release(&self.account);
        info!(account = %self.account, "credentials committed");
        Ok(())
    }

    /// Restore the baseline on the primary account.
    fn rollback(&mut self) -> Result<()> {
        match &self.baseline {
            Baseline::Present(cred) => {
                self.manager
                    .set_credentials(&self.account, &cred.username, &cred.password)?;
            }
            Baseline::Absent => {
                // Restoring "nothing" means deleting whatever is there.
                self.manager.delete_credentials(&self.account)?;
            }
        }
        self.phase = Phase::RolledBack;
        self.registry.release(&self.account);
        info!(account = %self.account, "credentials rolled back");
        Ok(())
    }
}

impl Drop for CredentialTransaction<'_> {
    fn drop(&mut self) {
        if self.phase == Phase::Staged {
            warn!(account = %self.account, "transaction dropped while staged");
            self.registry.release(&self.account);
        }
    }
}
