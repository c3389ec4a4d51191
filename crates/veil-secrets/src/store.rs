//! Secret storage backends.
//!
//! Defines the [`SecretStore`] trait and provides [`FileSecretStore`], which
//! keeps every secret in one encrypted file. Each call reloads the whole
//! file, applies its change, writes the file back if needed, and forgets the
//! decrypted map before returning.
//!
//! The lock only serializes callers sharing one store instance. Two stores
//! (or two processes) on the same path are not coordinated: whichever saves
//! last wins, and updates made in between are lost. Saves rewrite the file in
//! place, so a failure halfway through can leave it truncated.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{Result, SecretError};
use crate::types::{DerivedKey, Passphrase, SecretMap};

/// A key-value store for string secrets.
pub trait SecretStore: Send + Sync {
    /// Retrieve the value stored under `name`.
    fn get(&self, name: &str) -> Result<String>;

    /// Store `value` under `name`, replacing any previous value.
    fn set(&self, name: &str, value: &str) -> Result<()>;
}

/// A secret store backed by a single passphrase-encrypted file.
pub struct FileSecretStore {
    path: PathBuf,
    key: DerivedKey,
    /// Populated only while a call holds the lock.
    secrets: Mutex<SecretMap>,
}

impl FileSecretStore {
    /// Create a store for `path` unlocked with `passphrase`.
    ///
    /// Does not touch the filesystem; a missing file reads as an empty store
    /// and is created by the first [`set`](SecretStore::set).
    pub fn new(passphrase: impl Into<Passphrase>, path: impl Into<PathBuf>) -> Result<Self> {
        let key = crypto::derive_key(&passphrase.into())?;
        Ok(Self {
            path: path.into(),
            key,
            secrets: Mutex::new(SecretMap::new()),
        })
    }

    /// Location of the encrypted secrets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against freshly loaded secrets while holding the lock.
    fn with_secrets<T>(&self, op: impl FnOnce(&mut SecretMap) -> Result<T>) -> Result<T> {
        let mut secrets = self.secrets.lock();
        let result = self.load(&mut *secrets).and_then(|()| op(&mut *secrets));
        secrets.clear();
        result
    }

    fn load(&self, secrets: &mut SecretMap) -> Result<()> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no secrets file yet, starting empty");
                secrets.clear();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = crypto::decrypting_reader(&self.key, file)?;
        *secrets = read_secrets(BufReader::new(reader))?;
        debug!(path = %self.path.display(), count = secrets.len(), "loaded secrets");
        Ok(())
    }

    fn save(&self, secrets: &SecretMap) -> Result<()> {
        let mut payload = Zeroizing::new(serde_json::to_vec(secrets)?);
        payload.push(b'\n');

        let file = open_for_save(&self.path)?;
        let mut writer = crypto::encrypting_writer(&self.key, BufWriter::new(file))?;
        writer.write_all(&payload)?;
        writer.flush()?;

        debug!(path = %self.path.display(), count = secrets.len(), "saved secrets");
        Ok(())
    }
}

/// Open `path` for a full rewrite with owner-only permissions.
///
/// The mode is fixed before the old contents are dropped, so a file left
/// with looser permissions by an earlier release is tightened first.
fn open_for_save(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.set_len(0)?;
    Ok(file)
}

/// Decode the first JSON object in `reader`.
///
/// Anything after it is ignored: older releases rewrote the file without
/// truncating it, so a shrinking map could leave stale bytes behind.
fn read_secrets<R: Read>(reader: R) -> Result<SecretMap> {
    let mut values = serde_json::Deserializer::from_reader(reader).into_iter::<SecretMap>();
    match values.next() {
        Some(secrets) => Ok(secrets?),
        None => Err(SecretError::Decode(
            "secrets file has no content".to_string(),
        )),
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, name: &str) -> Result<String> {
        self.with_secrets(|secrets| {
            let value = secrets
                .get(name)
                .cloned()
                .ok_or_else(|| SecretError::NotFound(name.to_string()))?;
            debug!(name, "read secret");
            Ok(value)
        })
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.with_secrets(|secrets| {
            secrets.insert(name.to_string(), value.to_string());
            debug!(name, "writing secret");
            self.save(secrets)
        })
    }
}
