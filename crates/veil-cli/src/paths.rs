//! Path resolution utilities.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// File name of the secrets file inside the home directory.
pub const SECRETS_FILE_NAME: &str = ".secrets";

/// Get the default secrets file path (~/.secrets).
pub fn default_secrets_file() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(SECRETS_FILE_NAME))
}

/// Expand a leading `~/` in a path.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Resolve the secrets file from an optional `--file` override.
pub fn resolve_secrets_file(file: Option<&Path>) -> anyhow::Result<PathBuf> {
    match file {
        Some(path) => Ok(expand_tilde(path)),
        None => default_secrets_file(),
    }
}
