//! `veil set`: store a secret.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use veil_secrets::SecretStore;

/// Set command arguments.
#[derive(Args)]
pub struct SetArgs {
    /// Secret name (e.g. twitter_api_key)
    pub name: String,

    /// Secret value (if omitted, prompts for hidden input)
    pub value: Option<String>,
}

/// Run the set command.
pub fn run(args: SetArgs, store: &dyn SecretStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let value = match args.value {
        Some(v) => v,
        None => {
            let prompt = format!("Enter value for '{}': ", args.name);
            rpassword::prompt_password(prompt).context("failed to read secret value")?
        }
    };

    store
        .set(&args.name, &value)
        .with_context(|| format!("failed to store '{}'", args.name))?;

    writeln!(out, "Value set successfully!")?;
    Ok(())
}
