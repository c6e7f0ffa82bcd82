//! [`Pseudonymizer`]: deterministic PBKDF2-HMAC-SHA256 pseudonyms.
//!
//! Where the codec hides a value reversibly, the pseudonymizer replaces an
//! identifier (customer number, e-mail address) with a stable one-way
//! digest, so records can still be joined on the pseudonym without holding
//! the identifier itself. Determinism is the point here, in contrast to the
//! codec's randomised nonces: the same identifier under the same salt and
//! iteration count always yields the same pseudonym.
//!
//! The salt is a deployment-wide secret. Anyone holding salt and iteration
//! count can brute-force low-entropy identifiers, which is what the
//! iteration count is there to slow down.

use std::num::NonZeroU32;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Byte length of the derived pseudonym digest.
pub const PSEUDONYM_LEN: usize = 32;

/// Deterministic identifier pseudonymization with a fixed salt and cost.
#[derive(Clone)]
pub struct Pseudonymizer {
    salt: Vec<u8>,
    iterations: NonZeroU32,
}

impl Pseudonymizer {
    /// Build a pseudonymizer over a deployment-wide salt.
    ///
    /// The iteration count is the PBKDF2 work factor; the type rules out
    /// zero, so construction is infallible.
    pub fn new(salt: impl Into<Vec<u8>>, iterations: NonZeroU32) -> Self {
        Self {
            salt: salt.into(),
            iterations,
        }
    }

    /// Derive the stable pseudonym for `identifier`, base64url-encoded.
    pub fn pseudonymize(&self, identifier: &str) -> String {
        let mut digest = [0u8; PSEUDONYM_LEN];
        pbkdf2_hmac::<Sha256>(
            identifier.as_bytes(),
            &self.salt,
            self.iterations.get(),
            &mut digest,
        );
        URL_SAFE_NO_PAD.encode(digest)
    }
}

impl std::fmt::Debug for Pseudonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The salt is secret material; print only the public cost parameter.
        f.debug_struct("Pseudonymizer")
            .field("salt", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .finish()
    }
}
