//! Quick status overview command.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::credentials::CredentialManager;
use crate::core::jar::CookieJar;
use crate::core::keyvault::KeyVault;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Show a vault overview: backend, credentials, session, config.
pub fn execute(store: &SecretStore) -> Result<()> {
    let config = Config::load()?;
    let manager = CredentialManager::new(store);
    let jar = CookieJar::new(store, config.app_data_dir()?);
    let vault = KeyVault::new(store);

    output::section("Holt Status");

    output::kv("store", store.backend_label());
    output::kv("account", &config.vault.account);

    let (has_username, has_password) = manager.entry_presence(&config.vault.account)?;
    let login = match (has_username, has_password) {
        (true, true) => "stored (password presence-gated)".to_string(),
        (false, false) => "none".to_string(),
        _ => "incomplete pair".to_string(),
    };
    output::kv("login", login);

    output::kv(
        "session key",
        if vault.has_key()? { "present" } else { "none" },
    );

    let cookie_path = jar.file_path();
    let cookies = if jar.exists() {
        let size = std::fs::metadata(&cookie_path).map(|m| m.len()).unwrap_or(0);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&cookie_path)
                .map(|m| m.permissions().mode() & 0o777)
                .unwrap_or(0);
            if mode == 0o600 {
                format!("{} bytes, {}", size, cookie_path.display())
            } else {
                format!(
                    "{} bytes, {} (insecure permissions: {:o})",
                    size,
                    cookie_path.display(),
                    mode
                )
            }
        }
        #[cfg(not(unix))]
        {
            format!("{} bytes, {}", size, cookie_path.display())
        }
    } else {
        "none".to_string()
    };
    output::kv("cookies", cookies);

    let downloader = match config.downloader_binary() {
        Ok(path) => path.display().to_string(),
        Err(_) => "not found on PATH".to_string(),
    };
    output::kv("downloader", downloader);
    output::kv("config", Config::path()?.display().to_string());

    println!();
    if !has_username && !has_password && !jar.exists() {
        output::hint(&format!(
            "store a login with {} or import cookies with {}",
            output::cmd("holt login set"),
            output::cmd("holt cookies import <file>")
        ));
    } else if has_username != has_password {
        output::hint(&format!(
            "repair the login with {}",
            output::cmd("holt login set")
        ));
    }

    Ok(())
}
