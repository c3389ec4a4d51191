//! Passphrase-encrypted secret storage for Veil.
//!
//! Secrets live in a single file: a random 16-byte IV followed by the
//! AES-128-CFB encryption of a JSON object mapping names to values. The
//! AES key is the MD5 digest of the passphrase, which keeps files readable
//! by earlier Veil releases.

pub mod crypto;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, SecretError};
pub use store::{FileSecretStore, SecretStore};
pub use types::{DerivedKey, Passphrase, SecretMap};
