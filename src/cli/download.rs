//! Download command.
//!
//! Runs the downloader with stored credentials injected, falling back
//! to the saved cookie session when no credentials exist. Exits with
//! the downloader's status code.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::cli::{interact, output};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::credentials::{CredentialManager, CredentialPrompt};
use crate::core::jar::CookieJar;
use crate::core::store::SecretStore;
use crate::error::Result;

const LOGIN_REASON: &str = "use the stored login for this download";

/// Run the downloader for `url`. `extra` is passed through verbatim.
pub fn execute(store: &SecretStore, url: &str, extra: &[String]) -> Result<i32> {
    let config = Config::load()?;
    let binary = config.downloader_binary()?;
    let manager = CredentialManager::new(store);
    let jar = CookieJar::new(store, config.app_data_dir()?);

    let mut cmd = Command::new(&binary);
    cmd.arg(url);
    cmd.args(extra);

    // One gated read; if nothing is stored, offer to create the login
    // and use the freshly entered pair without a second challenge.
    let mut credential = manager.get_credentials(&config.vault.account, LOGIN_REASON)?;
    if credential.is_none() && !jar.exists() {
        if let Some(cred) = interact::TerminalPrompter.request(&config.vault.account)? {
            manager.set_credentials(&config.vault.account, &cred.username, &cred.password)?;
            credential = Some(cred);
        }
    }

    let mut exported_cookies: Option<PathBuf> = None;

    if let Some(cred) = &credential {
        info!(account = %config.vault.account, "download with stored credentials");
        cmd.arg("--username").arg(&cred.username);
        cmd.arg("--password").arg(cred.password.as_str());
        // Wrapper scripts read these instead of argv.
        cmd.env(constants::ENV_USERNAME, &cred.username);
        cmd.env(constants::ENV_PASSWORD, cred.password.as_str());
    } else if jar.exists() {
        // No login: hand the downloader the saved session instead.
        let export = jar.file_path().with_extension("txt.tmp");
        if jar.export_plaintext_file(&export)? {
            info!(path = %export.display(), "download with exported cookie session");
            cmd.arg("--cookies").arg(&export);
            exported_cookies = Some(export);
        }
    } else {
        output::warn("no stored login and no saved cookies; downloading anonymously");
    }

    debug!(binary = %binary.display(), url, "spawning downloader");
    let status = cmd.status().map_err(crate::error::ProbeError::Spawn)?;

    if let Some(path) = exported_cookies {
        if let Err(e) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "could not remove exported cookie file");
        }
    }

    Ok(status.code().unwrap_or(1))
}
