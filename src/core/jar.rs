//! Encrypted cookie jar.
//!
//! Persists exactly one sealed blob at
//! `<data-dir>/holt/yt-cookies/cookies.enc`. The directory is owner-only
//! (0700) and writes go through a temp sibling plus rename, so a reader
//! sees either the previous blob or the new one, never a partial file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::constants;
use crate::core::keyvault::KeyVault;
use crate::core::store::SecretStore;
use crate::error::{JarError, Result};

/// Presence-check reason shown when the session key is fetched.
const KEY_REASON: &str = "unlock the saved browser session";

/// Encrypted session cookie storage.
pub struct CookieJar<'a> {
    store: &'a SecretStore,
    dir: PathBuf,
}

impl<'a> CookieJar<'a> {
    /// Jar rooted at an explicit app data directory. Tests point this at
    /// a tempdir.
    pub fn new(store: &'a SecretStore, app_data_dir: PathBuf) -> Self {
        Self {
            store,
            dir: app_data_dir.join(constants::COOKIE_DIR),
        }
    }

    /// Jar under the platform data dir (`<data-dir>/holt`).
    pub fn open_default(store: &'a SecretStore) -> Result<Self> {
        let data = dirs::data_dir().ok_or(JarError::NoDataDir)?;
        Ok(Self::new(store, data.join(constants::APP_DIR)))
    }

    /// Path of the encrypted cookie file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(constants::COOKIE_FILE)
    }

    /// Whether a sealed session file exists.
    pub fn exists(&self) -> bool {
        self.file_path().exists()
    }

    /// Seal `plaintext` and persist it, replacing any previous session.
    pub fn save(&self, plaintext: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        let key = KeyVault::new(self.store).ensure_key(KEY_REASON)?;
        let blob = cipher::seal(key.as_ref(), plaintext)?;

        self.write_atomic(&blob)?;
        info!(path = %self.file_path().display(), bytes = blob.len(), "session saved");
        Ok(())
    }

    /// Load and open the sealed session.
    ///
    /// `None` if no session file exists. A blob sealed under a key that
    /// has since been replaced fails with an integrity error.
    pub fn load(&self) -> Result<Option<Zeroizing<Vec<u8>>>> {
        let path = self.file_path();
        let blob = match fs::read(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no session file");
                return Ok(None);
            }
            Err(e) => return Err(JarError::Read { path, source: e }.into()),
        };

        let key = KeyVault::new(self.store).ensure_key(KEY_REASON)?;
        let plaintext = cipher::open(key.as_ref(), &blob)?;
        debug!(path = %path.display(), bytes = plaintext.len(), "session loaded");
        Ok(Some(plaintext))
    }

    /// Delete the session file. Idempotent: `Ok(false)` when absent.
    pub fn delete(&self) -> Result<bool> {
        let path = self.file_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "session file deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(JarError::Write { path, source: e }.into()),
        }
    }

    /// Drop the saved session. Does not fetch a new one.
    pub fn reset(&self) -> Result<bool> {
        let removed = self.delete()?;
        if !removed {
            debug!("reset with no saved session");
        }
        Ok(removed)
    }

    /// Seal the contents of a plaintext cookie file, then remove it.
    ///
    /// The source is only removed after the sealed blob is durably in
    /// place.
    pub fn import_plaintext_file(&self, source: &Path) -> Result<()> {
        let plaintext = Zeroizing::new(fs::read(source).map_err(|e| JarError::ImportSource {
            path: source.to_path_buf(),
            source: e,
        })?);

        self.save(&plaintext)?;

        if let Err(e) = fs::remove_file(source) {
            // The sealed copy is safe; the leftover plaintext is the problem.
            warn!(path = %source.display(), error = %e, "could not remove plaintext source");
        }
        Ok(())
    }

    /// Decrypt the session to a plaintext file for the downloader.
    ///
    /// The file is created owner-only. Callers remove it when the
    /// downloader exits. `Ok(false)` when there is no saved session.
    pub fn export_plaintext_file(&self, dest: &Path) -> Result<bool> {
        let Some(plaintext) = self.load()? else {
            return Ok(false);
        };
        write_restricted(dest, &plaintext).map_err(|e| JarError::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;
        debug!(path = %dest.display(), "session exported as plaintext");
        Ok(true)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| JarError::Write {
            path: self.dir.clone(),
            source: e,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)).map_err(|e| {
                JarError::Write {
                    path: self.dir.clone(),
                    source: e,
                }
            })?;
        }
        Ok(())
    }

    /// Write the blob to a temp sibling, sync, then rename over the
    /// final path.
    fn write_atomic(&self, blob: &[u8]) -> Result<()> {
        let path = self.file_path();
        let tmp = self.dir.join(format!("{}.tmp", constants::COOKIE_FILE));

        let wrap = |e: std::io::Error, p: &Path| JarError::Write {
            path: p.to_path_buf(),
            source: e,
        };

        write_restricted(&tmp, blob).map_err(|e| wrap(e, &tmp))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            wrap(e, &path)
        })?;
        Ok(())
    }
}

/// Create (or truncate) a file with 0600 permissions, write, and sync.
fn write_restricted(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}
