//! [`TokenCodec`]: AES-256-GCM sealing and unsealing of secret strings.
//!
//! # Sealed token format
//!
//! ```text
//! base64url( nonce(12) ‖ tag(16) ‖ ciphertext )
//! ```
//!
//! The nonce is generated fresh from the OS CSPRNG on every seal, so two
//! seals of the same plaintext produce different tokens. The ciphertext has
//! the same length as the plaintext (no padding), which puts the minimum
//! decoded length at 28 bytes. Standard base64 padding is retained.
//!
//! Sealing is non-deterministic by design: equality of sealed tokens says
//! nothing about equality of plaintexts, so token strings must not be used
//! as cache or lookup keys.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, OsRng, Payload};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use thiserror::Error;
use tracing::warn;

use crate::key::EncryptionKey;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Minimum decoded length of a sealed token: nonce + tag, empty ciphertext.
pub const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Errors produced while sealing.
#[derive(Debug, Error)]
pub enum SealError {
    /// The underlying AEAD primitive failed. Unreachable with a valid key
    /// and plaintexts below the GCM length ceiling.
    #[error("aead encryption failed")]
    Aead,
}

/// Errors produced while unsealing.
///
/// The two variants are deliberately distinct: a malformed token is a caller
/// or storage bug, while an authentication failure is a tamper/corruption
/// signal (or a wrong-key attempt) and must never be silently ignored.
#[derive(Debug, Error)]
pub enum UnsealError {
    /// The sealed text is not valid base64, or decodes to fewer than
    /// [`MIN_SEALED_LEN`] bytes.
    #[error("malformed sealed token: {0}")]
    Malformed(String),

    /// The authentication tag did not verify: the token was modified,
    /// sealed under a different key, or bound to different associated data.
    /// No plaintext is released on this path.
    #[error("sealed token failed authentication")]
    AuthenticationFailed,
}

/// Stateless codec converting between plaintext strings and sealed tokens.
///
/// Both operations are pure transformations parameterised only by the fixed
/// key; the codec is `Send + Sync` and can be shared across threads freely.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: Aes256Gcm,
}

impl TokenCodec {
    /// Build a codec from a validated [`EncryptionKey`].
    ///
    /// Key validation happens entirely at [`EncryptionKey`] construction, so
    /// this never fails.
    pub fn new(key: EncryptionKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// Seal `plaintext` into a tamper-evident base64url token.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Aead`] on an internal AEAD error (unreachable
    /// with a valid key).
    pub fn seal(&self, plaintext: &str) -> Result<String, SealError> {
        self.seal_bound(plaintext, &[])
    }

    /// Seal `plaintext` bound to caller-supplied associated data.
    ///
    /// The associated data (e.g. a record identifier) is authenticated but
    /// not stored in the token; [`unseal_bound`](Self::unseal_bound) must be
    /// given the same bytes. Binding prevents a token sealed for one record
    /// from being copy-pasted into another.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::Aead`] on an internal AEAD error.
    pub fn seal_bound(&self, plaintext: &str, aad: &[u8]) -> Result<String, SealError> {
        // Use OsRng for a cryptographically secure random nonce.
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let payload = Payload {
            msg: plaintext.as_bytes(),
            aad,
        };
        let ct_and_tag = self
            .cipher
            .encrypt(nonce, payload)
            .map_err(|_| SealError::Aead)?;

        // The AEAD returns ciphertext ‖ tag; the stored layout is
        // nonce ‖ tag ‖ ciphertext.
        let split = ct_and_tag.len() - TAG_LEN;
        let mut blob = Vec::with_capacity(NONCE_LEN + ct_and_tag.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ct_and_tag[split..]);
        blob.extend_from_slice(&ct_and_tag[..split]);

        Ok(URL_SAFE.encode(blob))
    }

    /// Unseal a token produced by [`seal`](Self::seal) with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`UnsealError::Malformed`] if the text is not base64 or is
    /// too short to contain a nonce and tag, and
    /// [`UnsealError::AuthenticationFailed`] if the tag does not verify.
    pub fn unseal(&self, sealed: &str) -> Result<String, UnsealError> {
        self.unseal_bound(sealed, &[])
    }

    /// Unseal a token sealed with [`seal_bound`](Self::seal_bound) under the
    /// same associated data.
    ///
    /// # Errors
    ///
    /// Same as [`unseal`](Self::unseal); an AAD mismatch surfaces as
    /// [`UnsealError::AuthenticationFailed`].
    pub fn unseal_bound(&self, sealed: &str, aad: &[u8]) -> Result<String, UnsealError> {
        let blob = URL_SAFE
            .decode(sealed)
            .map_err(|e| UnsealError::Malformed(format!("base64 decode: {e}")))?;
        if blob.len() < MIN_SEALED_LEN {
            return Err(UnsealError::Malformed(format!(
                "decoded length {} below minimum {MIN_SEALED_LEN}",
                blob.len()
            )));
        }

        let (nonce_bytes, rest) = blob.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        // Reassemble the ciphertext ‖ tag layout the AEAD expects. The tag
        // is verified over the full ciphertext before any byte is released.
        let mut ct_and_tag = Vec::with_capacity(rest.len());
        ct_and_tag.extend_from_slice(ciphertext);
        ct_and_tag.extend_from_slice(tag);

        let nonce = Nonce::from_slice(nonce_bytes);
        let payload = Payload {
            msg: ct_and_tag.as_slice(),
            aad,
        };
        let plaintext = self.cipher.decrypt(nonce, payload).map_err(|_| {
            // Token content never appears in logs.
            warn!(len = blob.len(), "sealed token failed authentication");
            UnsealError::AuthenticationFailed
        })?;

        String::from_utf8(plaintext)
            .map_err(|_| UnsealError::Malformed("plaintext is not valid UTF-8".into()))
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenCodec([REDACTED])")
    }
}
