//! Internal client implementation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::auth::{Credentials, PasswordTokenSource, StaticTokenSource, TokenManager, TokenSource};
use crate::clock::Clock;
use crate::config::{ClientConfig, TlsConfig, UnauthorizedPolicy};
use crate::path::{PathEncoding, ResourceAddress, build_path, schema_namespaces_path};
use crate::transport::{AuthScheme, Method, Outcome, Payload, RawResponse, RequestExecutor, translate};
use crate::Result;

/// Shared state behind every [`Client`](super::Client) clone and every
/// resource client derived from it.
pub(crate) struct ClientInner {
    /// Executor bound to the session base URL.
    pub executor: RequestExecutor,

    /// Token cache.
    pub tokens: TokenManager,

    /// Path segment encoding.
    pub path_encoding: PathEncoding,

    /// What to do with the cached token on HTTP 401.
    pub unauthorized_policy: UnauthorizedPolicy,
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("base_url", &self.executor.base_url())
            .field("tokens", &self.tokens)
            .field("unauthorized_policy", &self.unauthorized_policy)
            .finish_non_exhaustive()
    }
}

impl ClientInner {
    /// Wires a document API session from its configuration.
    pub fn from_config(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let executor = RequestExecutor::new(
            config.base_url(),
            config.timeout(),
            config.tls(),
            AuthScheme::CassandraToken,
        )?;

        let source: Arc<dyn TokenSource> = match config.credentials() {
            Credentials::Password(creds) => {
                Arc::new(PasswordTokenSource::new(executor.clone(), creds.clone()))
            },
            Credentials::Bearer(token) => Arc::new(StaticTokenSource::new(token.clone())),
        };

        Ok(Self {
            executor,
            tokens: TokenManager::with_clock(source, config.token_ttl(), clock),
            path_encoding: config.path_encoding(),
            unauthorized_policy: config.unauthorized_policy(),
        })
    }

    /// Wires a session authenticated by a fixed `Authorization: Bearer` token.
    pub fn bearer(
        base_url: &str,
        token: &str,
        timeout: Duration,
        tls: &TlsConfig,
        ttl: Duration,
    ) -> Result<Self> {
        let executor = RequestExecutor::new(base_url, timeout, tls, AuthScheme::Bearer)?;
        Ok(Self {
            executor,
            tokens: TokenManager::new(StaticTokenSource::new(token), ttl),
            path_encoding: PathEncoding::Percent,
            unauthorized_policy: UnauthorizedPolicy::Keep,
        })
    }

    /// Builds the URL path for a document API address.
    pub fn path(&self, address: &ResourceAddress) -> Result<String> {
        build_path(address, self.path_encoding)
    }

    /// Builds the URL path for the namespace schema endpoint.
    pub fn schema_path(&self, namespace: Option<&str>) -> Result<String> {
        schema_namespaces_path(namespace, self.path_encoding)
    }

    /// Encodes a single path segment with the session encoding.
    pub fn segment(&self, value: &str) -> Result<String> {
        Ok(self.path_encoding.segment(value)?.into_owned())
    }

    /// Sends an authenticated request and returns the raw response.
    ///
    /// Applies the [`UnauthorizedPolicy`] when the response is HTTP 401.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Payload,
    ) -> Result<RawResponse> {
        let token = self.tokens.get_token().await?;
        let response = self
            .executor
            .execute(method, path, query, payload, Some(&token))
            .await?;

        if response.status() == 401 {
            if self.unauthorized_policy.invalidates() {
                if self.tokens.invalidate_if(&token) {
                    warn!(%method, path, "request unauthorized, dropped cached token");
                } else {
                    debug!(%method, path, "request unauthorized, token already renewed");
                }
            } else {
                debug!(%method, path, "request unauthorized, keeping cached token");
            }
        }

        Ok(response)
    }

    /// Sends an authenticated request and classifies the response.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Payload,
    ) -> Result<Outcome> {
        self.send(method, path, query, payload).await.map(translate)
    }
}
