//! Command-line interface.

pub mod completions;
pub mod cookies;
pub mod download;
pub mod interact;
pub mod login;
pub mod output;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::core::gate::{PresenceGate, UnattendedGate};
use crate::core::store::SecretStore;

/// Holt - credential and session vault for scripted yt-dlp downloads.
#[derive(Parser)]
#[command(
    name = "holt",
    about = "Credential and session vault for scripted yt-dlp downloads",
    version,
    after_help = "Keep your logins in the holt. 🦦"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Approve presence checks without prompting (scripted use)
    #[arg(long, global = true)]
    pub yes: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage the stored login
    Login {
        #[command(subcommand)]
        action: LoginAction,
    },

    /// Manage the encrypted cookie session
    Cookies {
        #[command(subcommand)]
        action: CookieAction,
    },

    /// Download a URL with stored credentials or cookies
    Download {
        /// URL to download
        url: String,
        /// Extra arguments passed to the downloader
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },

    /// Show quick status overview
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Login subcommands.
#[derive(Subcommand)]
pub enum LoginAction {
    /// Store credentials without testing them
    Set {
        /// Credential account (defaults to the configured account)
        #[arg(short, long)]
        account: Option<String>,
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Show which credential entries exist
    Show {
        /// Credential account
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Remove stored credentials
    Rm {
        /// Credential account
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Test credentials against the downloader, then save them
    Test {
        /// Credential account
        #[arg(short, long)]
        account: Option<String>,
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Probe URL override
        #[arg(long)]
        url: Option<String>,
    },
}

/// Cookie subcommands.
#[derive(Subcommand)]
pub enum CookieAction {
    /// Encrypt a plaintext cookie file into the jar
    Import {
        /// Path to a Netscape-format cookie file
        path: PathBuf,
    },

    /// Decrypt the jar to a plaintext file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Delete the saved session
    Rm,

    /// Drop the saved session (alias of rm with a fresh-start hint)
    Reset,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, yes: bool) -> crate::error::Result<()> {
    let gate: Arc<dyn PresenceGate> = if yes {
        Arc::new(UnattendedGate)
    } else {
        Arc::new(interact::TerminalGate)
    };
    let store = SecretStore::open_default(gate)?;

    match command {
        Command::Login { action } => match action {
            LoginAction::Set { account, username } => login::set(&store, account, username),
            LoginAction::Show { account } => login::show(&store, account),
            LoginAction::Rm { account } => login::rm(&store, account),
            LoginAction::Test {
                account,
                username,
                url,
            } => login::test(&store, account, username, url),
        },
        Command::Cookies { action } => match action {
            CookieAction::Import { path } => cookies::import(&store, path),
            CookieAction::Export { path } => cookies::export(&store, path),
            CookieAction::Rm => cookies::rm(&store),
            CookieAction::Reset => cookies::reset(&store),
        },
        Command::Download { url, extra } => {
            let code = download::execute(&store, &url, &extra)?;
            std::process::exit(code);
        }
        Command::Status => status::execute(&store),
        Command::Completions { shell } => completions::execute(shell),
    }
}
