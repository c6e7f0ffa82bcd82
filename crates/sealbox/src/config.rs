//! Configuration loading and validation.
//!
//! All values are read from environment variables at startup. Key material
//! is validated here, once, so that every later codec operation can assume a
//! well-formed key: a process must fail fast on a bad key rather than limp
//! along and fail on the first seal.

use std::num::NonZeroU32;

use serde::Deserialize;

use crate::codec::TokenCodec;
use crate::error::ConfigError;
use crate::key::EncryptionKey;
use crate::pseudonym::Pseudonymizer;

/// Validated library configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// URL-safe base64 encoding of the 32-byte AES key. **Required.**
    pub sealbox_key: String,

    /// Deployment-wide pseudonymization salt. **Required.**
    pub pseudonym_salt: String,

    /// PBKDF2 iteration count for pseudonyms.
    #[serde(default = "default_pseudonym_iterations")]
    pub pseudonym_iterations: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_pseudonym_iterations() -> u32 {
    600_000
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is absent, cannot be
    /// parsed, or fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .map_err(|e| ConfigError::Environment(e.to_string()))?;

        let c: Config = cfg
            .try_deserialize()
            .map_err(|e| ConfigError::Environment(e.to_string()))?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_empty(&self.sealbox_key, "SEALBOX_KEY")?;
        ensure_non_empty(&self.pseudonym_salt, "PSEUDONYM_SALT")?;

        // Decode the key now; a wrong-length or malformed key is a fatal
        // provisioning error, not something to discover per call.
        EncryptionKey::from_base64(&self.sealbox_key)?;

        if self.pseudonym_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    /// Build a [`TokenCodec`] from the configured key.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the key is malformed (already caught by
    /// [`from_env`](Self::from_env), but this constructor also serves
    /// directly-built configs).
    pub fn codec(&self) -> Result<TokenCodec, ConfigError> {
        let key = EncryptionKey::from_base64(&self.sealbox_key)?;
        Ok(TokenCodec::new(key))
    }

    /// Build a [`Pseudonymizer`] from the configured salt and cost.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroIterations`] if the iteration count is zero.
    pub fn pseudonymizer(&self) -> Result<Pseudonymizer, ConfigError> {
        let iterations =
            NonZeroU32::new(self.pseudonym_iterations).ok_or(ConfigError::ZeroIterations)?;
        Ok(Pseudonymizer::new(
            self.pseudonym_salt.as_bytes(),
            iterations,
        ))
    }
}

fn ensure_non_empty(value: &str, name: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue(name));
    }
    Ok(())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key and salt are secrets; log only the public settings.
        f.debug_struct("Config")
            .field("sealbox_key", &"[REDACTED]")
            .field("pseudonym_salt", &"[REDACTED]")
            .field("pseudonym_iterations", &self.pseudonym_iterations)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KEY_LEN;

    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine as _;

    fn valid_config() -> Config {
        Config {
            sealbox_key: URL_SAFE.encode([0u8; KEY_LEN]),
            pseudonym_salt: "deployment-salt".into(),
            pseudonym_iterations: default_pseudonym_iterations(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_pseudonym_iterations(), 600_000);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_key() {
        let mut cfg = valid_config();
        cfg.sealbox_key = "".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingValue("SEALBOX_KEY"))
        ));
    }

    #[test]
    fn validate_rejects_short_key() {
        let mut cfg = valid_config();
        cfg.sealbox_key = URL_SAFE.encode([0u8; 16]);
        assert!(matches!(cfg.validate(), Err(ConfigError::KeyLength(16))));
    }

    #[test]
    fn validate_rejects_non_base64_key() {
        let mut cfg = valid_config();
        cfg.sealbox_key = "!!not base64!!".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::KeyNotBase64(_))));
    }

    #[test]
    fn validate_rejects_empty_salt() {
        let mut cfg = valid_config();
        cfg.pseudonym_salt = "   ".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingValue("PSEUDONYM_SALT"))
        ));
    }

    #[test]
    fn validate_rejects_zero_iterations() {
        let mut cfg = valid_config();
        cfg.pseudonym_iterations = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroIterations)));
    }

    #[test]
    fn codec_and_pseudonymizer_build_from_valid_config() {
        let cfg = valid_config();
        let codec = cfg.codec().unwrap();
        let sealed = codec.seal("probe").unwrap();
        assert_eq!(codec.unseal(&sealed).unwrap(), "probe");
        let _ = cfg.pseudonymizer().unwrap();
    }

    #[test]
    fn debug_redacts_secrets() {
        let repr = format!("{:?}", valid_config());
        assert!(repr.contains("REDACTED"));
        assert!(!repr.contains("deployment-salt"));
    }
}
