//! Error types for secret storage.

use thiserror::Error;

/// Errors that can occur during secret operations.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret: no value for key {0:?}")]
    NotFound(String),

    /// IV generation, cipher setup, or a blob too short to hold an IV.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Decrypted bytes are not a JSON object of strings. A wrong passphrase
    /// lands here too; the file format carries no integrity tag.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SecretError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            SecretError::Io(err.into())
        } else {
            SecretError::Decode(err.to_string())
        }
    }
}

/// Convenience result alias for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
