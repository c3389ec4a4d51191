//! Shared helpers for Veil integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// Passphrase used by the integration tests.
pub const PASSPHRASE: &str = "integration passphrase";

/// A scratch directory holding one secrets file path.
pub struct Scratch {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Scratch {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(".secrets");
        Self { _dir: dir, path }
    }

    /// The secrets file path as a CLI argument.
    pub fn path_arg(&self) -> String {
        self.path.display().to_string()
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}
