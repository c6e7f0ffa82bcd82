//! Tracing subscriber setup for host applications.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the host's decision. This initialiser is a convenience for binaries
//! that have no subscriber of their own.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or token content** must appear in any
//!   log field anywhere in this crate.
//! - `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::ConfigError;

/// Install the global tracing subscriber with the given default level.
///
/// # Errors
///
/// Returns [`ConfigError::Telemetry`] if a global subscriber is already
/// installed.
pub fn init(log_level: &str) -> Result<(), ConfigError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ConfigError::Telemetry(e.to_string()))?;

    Ok(())
}
