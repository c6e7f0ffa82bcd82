//! [`EncryptionKey`]: fixed-length secret key material.
//!
//! The key is provisioned once, out-of-band, as a URL-safe base64 string
//! (environment variable or secret store). This module owns the only two
//! validation rules of that contract: decode the base64, reject anything
//! that is not exactly [`KEY_LEN`] bytes.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;

use crate::error::ConfigError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of key material.
///
/// The buffer is overwritten with zeroes on drop to minimise the window
/// during which plaintext key material lives in RAM.
#[derive(Clone)]
pub struct EncryptionKey(Box<[u8; KEY_LEN]>);

impl EncryptionKey {
    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyLength`] if `bytes` is not [`KEY_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() != KEY_LEN {
            return Err(ConfigError::KeyLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Decode a key from its provisioned URL-safe base64 form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotBase64`] if `encoded` is not valid
    /// URL-safe base64, or [`ConfigError::KeyLength`] if the decoded
    /// material is not [`KEY_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = URL_SAFE.decode(encoded)?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("EncryptionKey([REDACTED])")
    }
}
