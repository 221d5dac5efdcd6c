//! Constants used throughout holt.
//!
//! Centralizes magic strings and configuration values.

/// Application directory name under the OS data and config dirs.
pub const APP_DIR: &str = "holt";

/// Configuration file name (config.toml under the config dir).
pub const CONFIG_FILE: &str = "config.toml";

/// Secret record directory under the data dir (filesystem backend).
pub const SECRETS_DIR: &str = "secrets";

/// Cookie directory under the data dir.
pub const COOKIE_DIR: &str = "yt-cookies";

/// Encrypted cookie file name.
pub const COOKIE_FILE: &str = "cookies.enc";

/// Storage name suffix for username entries.
pub const USERNAME_SUFFIX: &str = "_username";

/// Storage name suffix for password entries.
pub const PASSWORD_SUFFIX: &str = "_password";

/// Storage name of the session encryption key.
pub const SESSION_KEY_NAME: &str = "cookie_encryption_key";

/// Default primary credential account.
pub const DEFAULT_ACCOUNT: &str = "main_user";

/// Account used to stage credentials during a login test.
pub const STAGING_ACCOUNT: &str = "temp_user";

/// Downloader binary resolved on PATH when no override is configured.
pub const DOWNLOADER_BIN: &str = "yt-dlp";

/// Marker line a probe wrapper prints on a verified login.
pub const LOGIN_OK_MARKER: &str = "HOLT_LOGIN_OK";

/// Legacy success phrase emitted by older wrapper scripts.
pub const LOGIN_OK_LEGACY: &str = "login successful";

/// URL probed with `--simulate` to verify credentials.
pub const DEFAULT_PROBE_URL: &str = "https://www.youtube.com/watch?v=BaW_jenozKc";

/// Environment variable consumed by wrapper scripts for the username.
pub const ENV_USERNAME: &str = "YTDLP_USERNAME";

/// Environment variable consumed by wrapper scripts for the password.
pub const ENV_PASSWORD: &str = "YTDLP_PASSWORD";

/// Environment variable forcing a store backend ("fs" or "memory").
pub const ENV_STORE: &str = "HOLT_STORE";

/// Environment variable disabling the Keychain backend on macOS.
pub const ENV_NO_KEYCHAIN: &str = "HOLT_NO_KEYCHAIN";
