//! Client types for connecting to Stargate.
//!
//! The SDK uses a hierarchical client structure:
//! - [`Client`]: Top-level client, owns the session and its token cache
//! - [`NamespaceClient`]: Namespace-scoped schema operations
//! - [`CollectionClient`]: Collection-scoped listing, search and creation
//! - [`DocumentClient`]: Single-document CRUD and sub-document access
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stargate::prelude::*;
//!
//! # async fn example() -> Result<(), Error> {
//! let client = Client::new(
//!     ClientConfig::builder()
//!         .base_url("http://localhost:8082")
//!         .username("cassandra")
//!         .password("cassandra")
//!         .build()?,
//! )?;
//!
//! let users = client.namespace("app").collection("users");
//! let id = users.create_document(&serde_json::json!({"name": "alice"})).await?;
//! let alice: Option<serde_json::Value> = users.document(&id).find().await?;
//! # Ok(())
//! # }
//! ```

mod inner;

pub(crate) use inner::ClientInner;

use std::sync::Arc;

use tracing::info;

use crate::auth::TokenState;
use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::document::types::{DataEnvelope, NamespaceInfo};
use crate::document::NamespaceClient;
use crate::transport::{Method, Payload, decode_required};
use crate::Result;

/// The Stargate SDK client.
///
/// This is the main entry point for the document API. Create one from a
/// [`ClientConfig`], then navigate to namespaces, collections and documents.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one HTTP connection pool
/// and one token cache, so they can be handed to many tasks; token renewal is
/// still performed at most once at a time.
///
/// ## Example
///
/// ```rust,no_run
/// use stargate::{Client, ClientConfig};
///
/// # async fn example() -> Result<(), stargate::Error> {
/// let client = Client::from_env()?;
///
/// let client2 = client.clone();
/// tokio::spawn(async move {
///     let exists = client2.namespace("app").exist().await;
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Creates a client for `config`.
    ///
    /// No network I/O happens until the first call; use
    /// [`connect()`](Self::connect) to verify credentials eagerly.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built from
    /// the TLS settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a client configured from environment variables.
    ///
    /// See [`ClientConfigBuilder::from_env`](crate::ClientConfigBuilder::from_env)
    /// for the variables read.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every missing variable.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Creates a client measuring token age with `clock`.
    ///
    /// # Errors
    ///
    /// As [`new()`](Self::new).
    pub fn with_clock(config: ClientConfig, clock: impl Clock) -> Result<Self> {
        let inner = ClientInner::from_config(&config, Arc::new(clock))?;
        info!(base_url = config.base_url(), "stargate client created");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Obtains a token, performing the credential exchange if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Auth`](crate::ErrorKind::Auth) if the credentials
    /// are rejected.
    pub async fn connect(&self) -> Result<()> {
        self.inner.tokens.get_token().await.map(|_| ())
    }

    /// Returns a valid token, renewing it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Auth`](crate::ErrorKind::Auth) if renewal fails.
    pub async fn token(&self) -> Result<String> {
        self.inner.tokens.get_token().await
    }

    /// Drops the cached token so the next call performs a fresh exchange.
    pub fn invalidate_token(&self) {
        self.inner.tokens.invalidate();
    }

    /// Returns the state of the token cache.
    pub fn token_state(&self) -> TokenState {
        self.inner.tokens.state()
    }

    /// Returns the base URL of the client.
    pub fn base_url(&self) -> &str {
        self.inner.executor.base_url()
    }

    /// Returns a namespace-scoped client.
    pub fn namespace(&self, name: impl Into<String>) -> NamespaceClient {
        NamespaceClient::new(self.clone(), name)
    }

    /// Lists all namespaces with their replication settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    pub async fn namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let path = self.inner.schema_path(None)?;
        let body = self
            .inner
            .dispatch(Method::Get, &path, &[], Payload::None)
            .await?
            .into_result()?;
        let envelope: DataEnvelope<Vec<NamespaceInfo>> = decode_required(body)?;
        Ok(envelope.data)
    }

    /// Lists the names of all namespaces.
    ///
    /// # Errors
    ///
    /// As [`namespaces()`](Self::namespaces).
    pub async fn namespace_names(&self) -> Result<Vec<String>> {
        Ok(self.namespaces().await?.into_iter().map(|ns| ns.name).collect())
    }

    /// Returns a reference to the inner client.
    pub(crate) fn inner(&self) -> &ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url())
            .field("token_state", &self.token_state())
            .finish_non_exhaustive()
    }
}
