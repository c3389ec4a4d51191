//! Veil command-line interface.

pub mod banner;
pub mod commands;
pub mod paths;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use veil_secrets::{FileSecretStore, Passphrase};

/// Veil - API key and secrets manager
#[derive(Parser)]
#[command(name = "veil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Passphrase used to encrypt and decrypt secrets (prompted if omitted)
    #[arg(short = 'k', long = "key", env = "VEIL_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// Path to the secrets file (default: ~/.secrets)
    #[arg(short, long, env = "VEIL_FILE", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Set a secret in your secret storage
    Set(commands::set::SetArgs),

    /// Get a secret from your secret storage
    Get(commands::get::GetArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments, writing to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Run the CLI with the given arguments, writing command output to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        banner::render(out)?;
        return Ok(());
    };

    match command {
        Commands::Set(args) => {
            let store = open_store(cli.key, cli.file)?;
            commands::set::run(args, &store, out)
        }
        Commands::Get(args) => {
            let store = open_store(cli.key, cli.file)?;
            commands::get::run(args, &store, out)
        }
        Commands::Version => {
            writeln!(out, "veil {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

/// Build the store from the passphrase and file options.
fn open_store(key: Option<String>, file: Option<PathBuf>) -> anyhow::Result<FileSecretStore> {
    let passphrase = match key {
        Some(key) => Passphrase::from(key),
        None => Passphrase::from(
            rpassword::prompt_password("Passphrase: ").context("failed to read passphrase")?,
        ),
    };
    let path = paths::resolve_secrets_file(file.as_deref())?;
    debug!(path = %path.display(), "opening secrets file");

    FileSecretStore::new(passphrase, path).context("failed to initialize secret store")
}
