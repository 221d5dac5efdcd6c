//! Terminal implementations of the interactive collaborators.
//!
//! The presence gate and the credential prompt are traits in core; this
//! module binds them to dialoguer prompts for foreground CLI use.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Password};
use tracing::debug;

use crate::cli::output;
use crate::core::credentials::CredentialPrompt;
use crate::core::gate::PresenceGate;
use crate::core::types::Credential;
use crate::error::Result;

/// Presence challenge as a terminal confirmation.
///
/// Without a terminal there is nobody to prove presence, so the
/// challenge is declined rather than silently approved.
pub struct TerminalGate;

impl PresenceGate for TerminalGate {
    fn confirm(&self, reason: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            debug!(reason, "presence check declined: no terminal");
            return Ok(false);
        }

        let approved = Confirm::new()
            .with_prompt(format!("Allow access to {}?", reason))
            .default(false)
            .interact()?;
        Ok(approved)
    }
}

/// Credential entry via terminal prompts.
///
/// Username defaults to the OS login name; the password is read hidden
/// and confirmed. Returns `None` when no terminal is attached or the
/// user enters an empty password.
pub struct TerminalPrompter;

impl CredentialPrompt for TerminalPrompter {
    fn request(&self, account: &str) -> Result<Option<Credential>> {
        if !io::stdin().is_terminal() {
            debug!(account, "cannot prompt for credentials: no terminal");
            return Ok(None);
        }

        output::dimmed(&format!("No stored login for {}", output::account(account)));

        let username: String = Input::new()
            .with_prompt("Username")
            .default(whoami::username())
            .interact_text()?;

        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "passwords do not match")
            .interact()?;

        if password.is_empty() {
            output::warn("empty password, nothing stored");
            return Ok(None);
        }

        Ok(Some(Credential::new(username, password)))
    }
}

/// Read a credential pair for `login set`/`login test`.
///
/// Interactive terminals get prompts; piped stdin supplies the username
/// on the first line and the password on the second.
pub fn read_credential(username_arg: Option<String>) -> Result<Option<Credential>> {
    if !io::stdin().is_terminal() {
        let mut lines = String::new();
        io::Read::read_to_string(&mut io::stdin(), &mut lines)?;
        let mut lines = lines.lines();

        let username = match username_arg {
            Some(u) => u,
            None => match lines.next() {
                Some(u) if !u.trim().is_empty() => u.trim().to_string(),
                _ => return Ok(None),
            },
        };
        let password = match lines.next() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => return Ok(None),
        };
        return Ok(Some(Credential::new(username, password)));
    }

    let username: String = match username_arg {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .default(whoami::username())
            .interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "passwords do not match")
        .interact()?;

    if password.is_empty() {
        return Ok(None);
    }
    Ok(Some(Credential::new(username, password)))
}
