//! Configuration types for the Stargate SDK.
//!
//! This module provides:
//! - [`ClientConfig`]: The resolved session settings (URL, credentials, TTL)
//! - [`ClientConfigBuilder`]: Validating builder, with environment fallback
//! - [`ConfigError`]: Every missing or invalid setting, reported at once
//! - [`UnauthorizedPolicy`]: What to do with the cached token on HTTP 401
//! - [`TlsConfig`]: TLS settings

mod env;
mod policy;
mod session;
mod tls;

pub use env::{
    ASTRA_DB_ID, ASTRA_DB_PASSWORD, ASTRA_DB_REGION, ASTRA_DB_TOKEN, ASTRA_DB_USERNAME, BASE_URL,
    PASSWORD, TOKEN_TTL, USERNAME,
};
pub use policy::UnauthorizedPolicy;
pub use session::{
    ClientConfig, ClientConfigBuilder, ConfigError, DEFAULT_TIMEOUT, DEFAULT_TOKEN_TTL,
    astra_base_url,
};
pub use tls::TlsConfig;
