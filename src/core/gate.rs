//! Presence challenge abstraction.
//!
//! Gated secrets require a live user confirmation at read time. The
//! challenge itself is a collaborator injected into the store, so the
//! vault logic never hard-codes a particular prompt mechanism and tests
//! can script approvals and denials.

use crate::error::Result;

/// A live user-presence challenge.
///
/// `confirm` blocks until the user approves or declines. Implementations
/// that need timeouts wrap the call themselves; the vault treats any
/// non-approval as a denial.
pub trait PresenceGate: Send + Sync {
    /// Present `reason` to the user and return whether they approved.
    fn confirm(&self, reason: &str) -> Result<bool>;
}

/// Gate that approves every challenge without interaction.
///
/// Used for scripted runs (`--yes`) and environments with no terminal.
/// Selecting it is an explicit caller decision, never a silent fallback.
pub struct UnattendedGate;

impl PresenceGate for UnattendedGate {
    fn confirm(&self, reason: &str) -> Result<bool> {
        tracing::debug!(reason, "presence check auto-approved (unattended)");
        Ok(true)
    }
}
