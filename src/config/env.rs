//! Environment-variable configuration.

use std::time::Duration;

use super::{ClientConfig, ClientConfigBuilder, ConfigError};

/// Astra database id.
pub const ASTRA_DB_ID: &str = "ASTRA_DB_ID";
/// Astra database region.
pub const ASTRA_DB_REGION: &str = "ASTRA_DB_REGION";
/// Username (Astra naming).
pub const ASTRA_DB_USERNAME: &str = "ASTRA_DB_USERNAME";
/// Password (Astra naming).
pub const ASTRA_DB_PASSWORD: &str = "ASTRA_DB_PASSWORD";
/// Application token, used instead of username/password.
pub const ASTRA_DB_TOKEN: &str = "ASTRA_DB_TOKEN";
/// Username (generic naming, takes precedence).
pub const USERNAME: &str = "USERNAME";
/// Password (generic naming, takes precedence).
pub const PASSWORD: &str = "PASSWORD";
/// Base URL override.
pub const BASE_URL: &str = "BASE_URL";
/// Token TTL override, in seconds.
pub const TOKEN_TTL: &str = "TOKEN_TTL";

impl ClientConfigBuilder {
    /// Creates a builder pre-populated from the process environment.
    ///
    /// Explicit setter calls made afterwards override environment values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a builder pre-populated from an arbitrary key lookup.
    ///
    /// `USERNAME`/`PASSWORD` win over `ASTRA_DB_USERNAME`/`ASTRA_DB_PASSWORD`.
    /// An unparsable `TOKEN_TTL` is recorded and reported by
    /// [`build()`](ClientConfigBuilder::build).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ClientConfigBuilder::default();

        builder.database_id = lookup(ASTRA_DB_ID);
        builder.region = lookup(ASTRA_DB_REGION);
        builder.base_url = lookup(BASE_URL);

        if let Some(username) = lookup(USERNAME).or_else(|| lookup(ASTRA_DB_USERNAME)) {
            builder = builder.username(username);
        }
        if let Some(password) = lookup(PASSWORD).or_else(|| lookup(ASTRA_DB_PASSWORD)) {
            builder = builder.password(password);
        }
        if let Some(token) = lookup(ASTRA_DB_TOKEN) {
            builder = builder.bearer_token(token);
        }

        if let Some(raw) = lookup(TOKEN_TTL) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => builder.token_ttl = Some(Duration::from_secs(secs)),
                Err(_) => builder
                    .problems
                    .push_invalid(format!("{} must be a number of seconds, got '{}'", TOKEN_TTL, raw)),
            }
        }

        builder
    }
}

impl ClientConfig {
    /// Resolves a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming every missing variable group.
    pub fn from_env() -> Result<ClientConfig, ConfigError> {
        ClientConfigBuilder::from_env().build()
    }
}
