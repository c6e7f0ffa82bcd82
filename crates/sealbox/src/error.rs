//! Construction-time error types shared across the crate.
//!
//! Call-time errors ([`SealError`](crate::codec::SealError),
//! [`UnsealError`](crate::codec::UnsealError)) live next to the codec.

use thiserror::Error;

use crate::key::KEY_LEN;

/// Errors raised while building a codec, pseudonymizer, or subscriber from
/// configuration. All of these are fatal to startup: a caller must not
/// proceed without a valid key.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read or deserialised into [`Config`](crate::config::Config).
    #[error("failed to load configuration from environment: {0}")]
    Environment(String),

    /// A required setting is absent or empty.
    #[error("{0} is required and must not be empty")]
    MissingValue(&'static str),

    /// The key material is not valid URL-safe base64.
    #[error("encryption key is not valid base64: {0}")]
    KeyNotBase64(#[from] base64::DecodeError),

    /// The key decoded to the wrong number of bytes.
    #[error("encryption key must decode to exactly {KEY_LEN} bytes, got {0}")]
    KeyLength(usize),

    /// The PBKDF2 iteration count is zero.
    #[error("PSEUDONYM_ITERATIONS must be > 0")]
    ZeroIterations,

    /// The global tracing subscriber could not be installed.
    #[error("failed to initialise tracing subscriber: {0}")]
    Telemetry(String),
}
