//! Authentication for the Stargate SDK.
//!
//! - [`Credentials`]: username/password or a pre-issued bearer token
//! - [`TokenSource`]: performs one credential exchange
//! - [`PasswordTokenSource`]: `POST /v1/auth/` exchange
//! - [`StaticTokenSource`]: serves a pre-issued token
//! - [`TokenManager`]: caches the token for a TTL and renews it on demand
//!
//! ## Username and password
//!
//! ```rust,no_run
//! use stargate::{Client, ClientConfig};
//!
//! # async fn example() -> Result<(), stargate::Error> {
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:8082")
//!     .username("cassandra")
//!     .password("cassandra")
//!     .build()?;
//! let client = Client::new(config)?;
//! client.connect().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Application token
//!
//! ```rust,no_run
//! use stargate::{Client, ClientConfig};
//!
//! # async fn example() -> Result<(), stargate::Error> {
//! let config = ClientConfig::builder()
//!     .database_id("00000000-0000-0000-0000-000000000000")
//!     .region("us-east1")
//!     .bearer_token("AstraCS:...")
//!     .build()?;
//! let client = Client::new(config)?;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod manager;
mod provider;

pub use credentials::{BearerToken, Credentials, PasswordCredentials};
pub use manager::{TokenManager, TokenState};
pub use provider::{AUTH_PATH, PasswordTokenSource, StaticTokenSource, TokenFuture, TokenSource};
