//! AES-128-CFB stream encryption keyed by an MD5 passphrase digest.
//!
//! Every encryption draws a fresh random IV and emits it in clear ahead of
//! the ciphertext, so a blob is `iv || ciphertext` with no padding and no
//! authentication tag. The one-shot helpers and the [`EncryptingWriter`] /
//! [`DecryptingReader`] adapters produce the same keystream for the same
//! `(key, iv)` and can be mixed freely, whatever chunk sizes are used.
//!
//! MD5 is a fast, unsalted hash and a poor password KDF. It is kept so that
//! existing secrets files stay readable.

use std::io::{self, Read, Write};

use aes::Aes128;
use cfb_mode::cipher::KeyIvInit;
use cfb_mode::{BufDecryptor, BufEncryptor};
use rand::RngCore;

use crate::error::{Result, SecretError};
use crate::types::{DerivedKey, Passphrase};

/// Length of a derived key in bytes (AES-128).
pub const KEY_LEN: usize = 16;

/// Length of the IV prefix in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Derive the store key from `passphrase`.
///
/// Deterministic: the same passphrase always yields the same key.
pub fn derive_key(passphrase: &Passphrase) -> Result<DerivedKey> {
    let digest = md5::compute(passphrase.expose().as_bytes());
    Ok(DerivedKey::from_bytes(digest.0))
}

fn fresh_iv() -> Result<[u8; IV_LEN]> {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng()
        .try_fill_bytes(&mut iv)
        .map_err(|e| SecretError::Crypto(format!("IV generation failed: {e}")))?;
    Ok(iv)
}

fn new_encryptor(key: &DerivedKey, iv: &[u8]) -> Result<BufEncryptor<Aes128>> {
    BufEncryptor::<Aes128>::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| SecretError::Crypto(format!("cipher setup failed: {e}")))
}

fn new_decryptor(key: &DerivedKey, iv: &[u8]) -> Result<BufDecryptor<Aes128>> {
    BufDecryptor::<Aes128>::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| SecretError::Crypto(format!("cipher setup failed: {e}")))
}

fn too_short() -> SecretError {
    SecretError::Crypto("ciphertext too short".to_string())
}

/// A [`Write`] adapter that encrypts everything written through it.
///
/// Created by [`encrypting_writer`], which has already written the IV to the
/// underlying sink.
pub struct EncryptingWriter<W: Write> {
    inner: W,
    cipher: BufEncryptor<Aes128>,
    scratch: Vec<u8>,
}

impl<W: Write> EncryptingWriter<W> {
    /// Unwrap the sink. Any data already written has been forwarded.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for EncryptingWriter<W> {
    // The keystream advances as soon as bytes are encrypted, so a chunk is
    // either forwarded whole or the writer reports an error.
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.scratch.clear();
        self.scratch.extend_from_slice(data);
        self.cipher.encrypt(&mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A [`Read`] adapter that decrypts everything read through it.
///
/// Created by [`decrypting_reader`], which has already consumed the IV.
pub struct DecryptingReader<R: Read> {
    inner: R,
    cipher: BufDecryptor<Aes128>,
}

impl<R: Read> Read for DecryptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.cipher.decrypt(&mut buf[..n]);
        Ok(n)
    }
}

/// Write a fresh IV to `sink` and return a writer that encrypts into it.
pub fn encrypting_writer<W: Write>(key: &DerivedKey, mut sink: W) -> Result<EncryptingWriter<W>> {
    let iv = fresh_iv()?;
    let cipher = new_encryptor(key, &iv)?;
    sink.write_all(&iv)?;
    Ok(EncryptingWriter {
        inner: sink,
        cipher,
        scratch: Vec::new(),
    })
}

/// Read the IV from `source` and return a reader that decrypts the rest.
///
/// Fails with [`SecretError::Crypto`] if `source` ends before a full IV.
pub fn decrypting_reader<R: Read>(key: &DerivedKey, mut source: R) -> Result<DecryptingReader<R>> {
    let mut iv = [0u8; IV_LEN];
    source.read_exact(&mut iv).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => too_short(),
        _ => SecretError::Io(e),
    })?;
    let cipher = new_decryptor(key, &iv)?;
    Ok(DecryptingReader {
        inner: source,
        cipher,
    })
}

/// Encrypt `plaintext` into a fresh `iv || ciphertext` blob.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let buf = Vec::with_capacity(IV_LEN + plaintext.len());
    let mut writer = encrypting_writer(key, buf)?;
    writer.write_all(plaintext)?;
    Ok(writer.into_inner())
}

/// Decrypt a blob produced by [`encrypt`] or [`EncryptingWriter`].
pub fn decrypt(key: &DerivedKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < IV_LEN {
        return Err(too_short());
    }
    let (iv, ciphertext) = blob.split_at(IV_LEN);
    let mut cipher = new_decryptor(key, iv)?;
    let mut plaintext = ciphertext.to_vec();
    cipher.decrypt(&mut plaintext);
    Ok(plaintext)
}

/// Like [`encrypt`], returning the blob as lowercase hex.
pub fn encrypt_hex(key: &DerivedKey, plaintext: &[u8]) -> Result<String> {
    Ok(hex::encode(encrypt(key, plaintext)?))
}

/// Inverse of [`encrypt_hex`].
pub fn decrypt_hex(key: &DerivedKey, blob_hex: &str) -> Result<Vec<u8>> {
    let blob = hex::decode(blob_hex.trim())
        .map_err(|e| SecretError::Decode(format!("hex decode failed: {e}")))?;
    decrypt(key, &blob)
}
