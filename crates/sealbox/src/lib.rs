//! `sealbox` — authenticated sealing of secret tokens.
//!
//! Two complementary primitives for keeping third-party credentials and
//! customer identifiers out of storage in the clear:
//!
//! - [`TokenCodec`]: reversible AES-256-GCM sealing of a secret string into
//!   a tamper-evident base64url blob, safe for a text column or JSON field.
//! - [`Pseudonymizer`]: one-way, deterministic PBKDF2-HMAC-SHA256 pseudonyms
//!   for identifiers that must remain joinable but not recoverable.
//!
//! The 32-byte key and pseudonymization salt are provisioned out-of-band and
//! validated once at construction ([`EncryptionKey`], [`Config`]); every
//! failure after that point is a typed, per-call error. There is no global
//! key holder: callers construct a codec and pass it where it is needed.

pub mod codec;
pub mod config;
pub mod error;
pub mod key;
pub mod pseudonym;
pub mod telemetry;

pub use codec::{SealError, TokenCodec, UnsealError};
pub use config::Config;
pub use error::ConfigError;
pub use key::EncryptionKey;
pub use pseudonym::Pseudonymizer;
