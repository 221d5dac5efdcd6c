//! Login commands.
//!
//! Credential CRUD plus the staged login test: stage the new pair,
//! probe it against the downloader, and only then promote it.

use tracing::info;

use crate::cli::{interact, output};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::credentials::CredentialManager;
use crate::core::probe::DownloaderProbe;
use crate::core::store::SecretStore;
use crate::core::txn::{CredentialTransaction, InFlight, TxnOutcome};
use crate::core::types::SecretId;
use crate::error::{Error, Result};

fn resolve_account(config: &Config, account: Option<String>) -> String {
    account.unwrap_or_else(|| config.vault.account.clone())
}

/// Store credentials for an account.
pub fn set(store: &SecretStore, account: Option<String>, username: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let account = resolve_account(&config, account);
    let manager = CredentialManager::new(store);

    let Some(cred) = interact::read_credential(username)? else {
        output::warn("no credentials entered");
        return Ok(());
    };

    let (had_username, had_password) = manager.entry_presence(&account)?;
    if had_username || had_password {
        output::warn(&format!(
            "replacing stored login for {}",
            output::account(&account)
        ));
    }

    manager.set_credentials(&account, &cred.username, &cred.password)?;
    output::success(&format!("credentials saved for {}", output::account(&account)));
    output::hint(&format!(
        "verify them with {}",
        output::cmd("holt login test")
    ));
    Ok(())
}

/// Show which credential entries exist. Never prints the password.
pub fn show(store: &SecretStore, account: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let account = resolve_account(&config, account);
    let manager = CredentialManager::new(store);

    let (has_username, has_password) = manager.entry_presence(&account)?;
    if !has_username && !has_password {
        output::dimmed(&format!("no stored login for {}", output::account(&account)));
        output::hint(&format!("add one with {}", output::cmd("holt login set")));
        return Ok(());
    }

    output::section("Login");
    output::kv("account", &account);
    if has_username {
        let username = store
            .get(&SecretId::username(&account), "show stored username")?
            .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
            .unwrap_or_default();
        output::kv("username", username);
    } else {
        output::kv("username", "missing");
    }
    output::kv(
        "password",
        if has_password {
            "set (presence-gated)"
        } else {
            "missing"
        },
    );
    if has_username != has_password {
        output::warn("incomplete pair; set credentials again");
    }
    Ok(())
}

/// Remove stored credentials.
pub fn rm(store: &SecretStore, account: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let account = resolve_account(&config, account);
    let manager = CredentialManager::new(store);

    if manager.delete_credentials(&account)? {
        output::success(&format!("removed login for {}", output::account(&account)));
    } else {
        output::dimmed(&format!("no stored login for {}", output::account(&account)));
    }
    Ok(())
}

/// Test new credentials and promote them only if the probe passes.
pub fn test(
    store: &SecretStore,
    account: Option<String>,
    username: Option<String>,
    url: Option<String>,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = url {
        config.probe.url = url;
    }
    let account = resolve_account(&config, account);
    let manager = CredentialManager::new(store);
    let registry = InFlight::new();

    let Some(cred) = interact::read_credential(username)? else {
        output::warn("no credentials entered");
        return Ok(());
    };

    let probe = DownloaderProbe::from_config(&config)?;

    info!(account, "starting credential test");
    let mut txn = CredentialTransaction::begin(
        &manager,
        &registry,
        &account,
        constants::STAGING_ACCOUNT,
        &cred.username,
        &cred.password,
    )?;

    output::progress("Testing login");
    let outcome = txn.validate(&probe);
    match outcome {
        Ok(TxnOutcome::Committed) => {
            output::progress_done(true);
            output::success(&format!(
                "login verified, credentials saved for {}",
                output::account(&account)
            ));
        }
        Ok(TxnOutcome::RolledBack { reason }) => {
            output::progress_done(false);
            output::dimmed("previous credentials were restored");
            return Err(Error::Other(format!("login failed: {}", reason)));
        }
        Err(e) => {
            output::progress_done(false);
            return Err(e);
        }
    }
    Ok(())
}
