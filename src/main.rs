//! Holt - credential and session vault for scripted yt-dlp downloads.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use holt::cli::output;
use holt::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HOLT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("holt=debug")
        } else {
            EnvFilter::new("holt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.yes) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            holt::error::Error::Store(holt::error::StoreError::AccessDenied) => {
                Some("approve the presence check, or rerun with --yes for scripted use")
            }
            holt::error::Error::Probe(holt::error::ProbeError::DownloaderNotFound(_)) => {
                Some("install yt-dlp, or set downloader.binary in config.toml")
            }
            holt::error::Error::Cipher(holt::error::CipherError::Integrity) => {
                Some("run: holt cookies reset")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
