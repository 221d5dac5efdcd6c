//! Filesystem store backend.
//!
//! Stores one JSON record file per secret under an owner-only directory.
//! On platforms without an OS keystore the file permissions are the
//! protection boundary: the record directory is 0700 and each record
//! file 0600.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{PutOutcome, StoreBackend};
use crate::core::constants;
use crate::error::{Result, StoreError};

/// Filesystem-backed secret records.
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Backend rooted at an explicit directory. Tests point this at a
    /// tempdir.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Backend rooted at `<data-dir>/holt/secrets`.
    pub fn open_default() -> Result<Self> {
        let data = dirs::data_dir().ok_or_else(|| StoreError::Fault {
            code: 0,
            message: "unable to determine data directory".to_string(),
        })?;
        Ok(Self::new(
            data.join(constants::APP_DIR).join(constants::SECRETS_DIR),
        ))
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    /// Create the record directory with owner-only permissions.
    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| fault("create record dir", &e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.root, fs::Permissions::from_mode(0o700))
                .map_err(|e| fault("restrict record dir", &e))?;
        }
        Ok(())
    }

    fn open_record(&self, name: &str, create_new: bool) -> std::io::Result<fs::File> {
        let mut opts = fs::OpenOptions::new();
        opts.write(true);
        if create_new {
            opts.create_new(true);
        } else {
            opts.create(true).truncate(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        opts.open(self.record_path(name))
    }
}

impl StoreBackend for Filesystem {
    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        self.ensure_root()?;
        let mut file = self
            .open_record(name, false)
            .map_err(|e| fault("write record", &e))?;
        file.write_all(data).map_err(|e| fault("write record", &e))?;
        file.sync_all().map_err(|e| fault("sync record", &e))?;
        debug!(name, "wrote record file");
        Ok(())
    }

    fn write_if_absent(&self, name: &str, data: &[u8]) -> Result<PutOutcome> {
        self.ensure_root()?;
        // create_new makes the existence check and the create one atomic
        // filesystem operation, so two racing writers cannot both win.
        let mut file = match self.open_record(name, true) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!(name, "record already present, keeping existing");
                return Ok(PutOutcome::AlreadyExists);
            }
            Err(e) => return Err(fault("create record", &e).into()),
        };
        file.write_all(data).map_err(|e| fault("write record", &e))?;
        file.sync_all().map_err(|e| fault("sync record", &e))?;
        Ok(PutOutcome::Created)
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.record_path(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(fault("read record", &e).into()),
        }
    }

    fn remove(&self, name: &str) -> Result<bool> {
        match fs::remove_file(self.record_path(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(fault("remove record", &e).into()),
        }
    }

    fn label(&self) -> &'static str {
        "filesystem"
    }
}

fn fault(op: &str, e: &std::io::Error) -> StoreError {
    StoreError::Fault {
        code: e.raw_os_error().unwrap_or(0),
        message: format!("{}: {}", op, e),
    }
}
