//! Environment-driven application configuration.
//!
//! All runtime settings come from environment variables:
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string.
//! - `BIND_ADDR` (default `0.0.0.0:8080`): listen address.
//! - `DATABASE_POOL_SIZE` (default 10): maximum pool connections.
//! - `SESSION_KEY_FILE` (default `/var/run/secrets/session_key`): file whose
//!   bytes derive the cookie signing key.
//! - `SESSION_ALLOW_EPHEMERAL=1`: permit a generated throwaway key when the
//!   key file is unreadable (always permitted in debug builds).
//! - `SESSION_COOKIE_SECURE` (default on; `0` disables): the `Secure` cookie
//!   attribute.

use std::env;

use actix_web::cookie::Key;
use tracing::warn;

/// Default session key location when `SESSION_KEY_FILE` is unset.
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";

/// Errors raised while assembling the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The required `DATABASE_URL` variable is missing.
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    /// The session key file could not be read and no fallback applies.
    #[error("failed to read session key at {path}: {message}")]
    SessionKey {
        /// Path that was attempted.
        path: String,
        /// Underlying read failure.
        message: String,
    },
    /// A variable is present but malformed.
    #[error("invalid {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse failure description.
        message: String,
    },
}

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Listen address in `host:port` form.
    pub bind_addr: String,
    /// Maximum database pool connections.
    pub pool_max_size: u32,
    /// Cookie signing key.
    pub session_key: Key,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Assemble the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is absent, a variable is
    /// malformed, or the session key cannot be obtained.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
        let pool_max_size = parse_pool_size(env::var("DATABASE_POOL_SIZE").ok())?;

        let key_path = env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_KEY_PATH.into());
        let allow_ephemeral = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
        let session_key = load_session_key(&key_path, allow_ephemeral)?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            pool_max_size,
            session_key,
            cookie_secure,
        })
    }
}

fn parse_pool_size(raw: Option<String>) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(10),
        Some(value) => value
            .parse::<u32>()
            .map_err(|e| ConfigError::Invalid {
                name: "DATABASE_POOL_SIZE",
                message: e.to_string(),
            })
            .and_then(|size| {
                if size == 0 {
                    Err(ConfigError::Invalid {
                        name: "DATABASE_POOL_SIZE",
                        message: "must be at least 1".to_owned(),
                    })
                } else {
                    Ok(size)
                }
            }),
    }
}

fn load_session_key(key_path: &str, allow_ephemeral: bool) -> Result<Key, ConfigError> {
    match std::fs::read(key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(ConfigError::SessionKey {
                    path: key_path.to_owned(),
                    message: e.to_string(),
                })
            }
        }
    }
}
