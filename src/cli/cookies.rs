//! Cookie jar commands.
//!
//! Import a plaintext cookie file into the encrypted jar, export it
//! back out for the downloader, or drop the saved session.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::jar::CookieJar;
use crate::core::store::SecretStore;
use crate::error::Result;

fn open_jar<'a>(store: &'a SecretStore, config: &Config) -> Result<CookieJar<'a>> {
    Ok(CookieJar::new(store, config.app_data_dir()?))
}

/// Seal a plaintext cookie file and remove the original.
pub fn import(store: &SecretStore, path: PathBuf) -> Result<()> {
    let config = Config::load()?;
    let jar = open_jar(store, &config)?;

    output::progress("Encrypting cookies");
    jar.import_plaintext_file(&path)?;
    output::progress_done(true);

    output::success(&format!(
        "cookies sealed into {}",
        output::path(&jar.file_path().display().to_string())
    ));
    output::dimmed("the plaintext source file was removed");
    Ok(())
}

/// Decrypt the jar to a plaintext file.
pub fn export(store: &SecretStore, path: PathBuf) -> Result<()> {
    let config = Config::load()?;
    let jar = open_jar(store, &config)?;

    if jar.export_plaintext_file(&path)? {
        output::success(&format!(
            "cookies exported to {}",
            output::path(&path.display().to_string())
        ));
        output::warn("the exported file is plaintext; delete it after use");
    } else {
        output::dimmed("no saved cookies");
        output::hint(&format!(
            "import a cookie file with {}",
            output::cmd("holt cookies import <file>")
        ));
    }
    Ok(())
}

/// Delete the encrypted session file.
pub fn rm(store: &SecretStore) -> Result<()> {
    let config = Config::load()?;
    let jar = open_jar(store, &config)?;

    if jar.delete()? {
        output::success("saved cookies deleted");
    } else {
        output::dimmed("no saved cookies");
    }
    Ok(())
}

/// Drop the saved session so the next download starts clean.
pub fn reset(store: &SecretStore) -> Result<()> {
    let config = Config::load()?;
    let jar = open_jar(store, &config)?;

    jar.reset()?;
    output::success("session reset");
    output::hint("the next authenticated download will need fresh cookies or credentials");
    Ok(())
}
