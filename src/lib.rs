//! Holt - credential and session vault for scripted yt-dlp downloads.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── login         # Credential CRUD and the staged login test
//! │   ├── cookies       # Encrypted cookie jar operations
//! │   ├── download      # Run the downloader with stored credentials
//! │   ├── status        # Vault overview
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── store/        # Secret storage backends
//!     │   ├── mod       # StoreBackend trait + gated SecretStore front
//!     │   ├── fs        # Filesystem records (0700 dir, 0600 files)
//!     │   ├── memory    # In-memory records for tests
//!     │   └── keychain  # macOS Keychain records
//!     ├── gate          # Presence challenge abstraction
//!     ├── keyvault      # Single 256-bit session key lifecycle
//!     ├── cipher        # AES-256-GCM seal/open (nonce || ct || tag)
//!     ├── jar           # Atomic encrypted cookie file
//!     ├── credentials   # Username/password pairs per account
//!     ├── txn           # Stage -> validate -> commit/rollback
//!     ├── probe         # External login validation
//!     └── config        # config.toml management
//! ```
//!
//! # Features
//!
//! - Credentials in the OS keychain (or restricted files elsewhere)
//! - Presence-gated reads for passwords and the session key
//! - Encrypted cookie jar with crash-safe atomic writes
//! - Staged credential tests that never clobber a working login

pub mod cli;
pub mod core;
pub mod error;
