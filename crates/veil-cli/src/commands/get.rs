//! `veil get`: print a stored secret.

use std::io::Write;

use clap::Args;
use veil_secrets::{SecretError, SecretStore};

/// Message shown when the requested name has no value.
pub const NO_VALUE_MESSAGE: &str = "no value set";

/// Get command arguments.
#[derive(Args)]
pub struct GetArgs {
    /// Secret name
    pub name: String,
}

/// Run the get command.
pub fn run(args: GetArgs, store: &dyn SecretStore, out: &mut dyn Write) -> anyhow::Result<()> {
    match store.get(&args.name) {
        Ok(value) => {
            writeln!(out, "{} = {}", args.name, value)?;
            Ok(())
        }
        Err(e @ SecretError::NotFound(_)) => Err(anyhow::Error::new(e).context(NO_VALUE_MESSAGE)),
        Err(e) => Err(anyhow::Error::new(e).context("failed to read secrets file")),
    }
}
