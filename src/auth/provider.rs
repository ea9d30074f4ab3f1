//! Token sources: one credential exchange each.

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BearerToken, PasswordCredentials};
use crate::transport::{Method, Payload, RequestExecutor};
use crate::{Error, ErrorKind, Result};

/// Path of the credential exchange endpoint, relative to the base URL.
pub const AUTH_PATH: &str = "/v1/auth/";

/// A type alias for the boxed future returned by token sources.
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Produces a fresh auth token.
///
/// A source performs exactly one exchange per call; caching and
/// de-duplication of concurrent calls are the job of
/// [`TokenManager`](super::TokenManager).
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn TokenSource>`.
///
/// ## Example
///
/// ```rust
/// use stargate::auth::{TokenFuture, TokenSource};
///
/// struct EnvTokenSource;
///
/// impl TokenSource for EnvTokenSource {
///     fn fetch_token(&self) -> TokenFuture<'_> {
///         Box::pin(async {
///             std::env::var("STARGATE_TOKEN")
///                 .map_err(|_| stargate::Error::auth("STARGATE_TOKEN not set"))
///         })
///     }
/// }
/// ```
pub trait TokenSource: Send + Sync {
    /// Returns a future that resolves to a new token.
    ///
    /// # Errors
    ///
    /// Implementations return [`ErrorKind::Auth`] when the exchange is
    /// rejected, carrying the HTTP status and body when available.
    fn fetch_token(&self) -> TokenFuture<'_>;
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn fetch_token(&self) -> TokenFuture<'_> {
        (**self).fetch_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn fetch_token(&self) -> TokenFuture<'_> {
        (**self).fetch_token()
    }
}

/// Serves a pre-issued token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: BearerToken,
}

impl StaticTokenSource {
    /// Creates a source that always returns `token`.
    pub fn new(token: impl Into<BearerToken>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenSource for StaticTokenSource {
    fn fetch_token(&self) -> TokenFuture<'_> {
        Box::pin(async move { Ok(self.token.token().to_string()) })
    }
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    auth_token: String,
}

/// Exchanges a username/password pair for a token via `POST /v1/auth/`.
#[derive(Debug, Clone)]
pub struct PasswordTokenSource {
    executor: RequestExecutor,
    credentials: PasswordCredentials,
}

impl PasswordTokenSource {
    /// Creates a source posting to `{executor base URL}/v1/auth/`.
    pub fn new(executor: RequestExecutor, credentials: PasswordCredentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    async fn exchange(&self) -> Result<String> {
        let payload = Payload::json(&AuthRequest {
            username: self.credentials.username(),
            password: self.credentials.password(),
        })?;

        let response = self
            .executor
            .execute(Method::Post, AUTH_PATH, &[], payload, None)
            .await
            .map_err(|e| Error::auth(format!("token exchange failed: {}", e)).with_source(e))?;

        let status = response.status();
        if status != 200 && status != 201 {
            warn!(status, username = self.credentials.username(), "token exchange rejected");
            return Err(Error::new(ErrorKind::Auth, format!("token exchange rejected with HTTP {}", status))
                .with_status(status)
                .with_body(response.body_text()));
        }

        let parsed: AuthResponse = serde_json::from_slice(response.body()).map_err(|e| {
            Error::auth(format!("token exchange returned an unreadable body: {}", e))
                .with_status(status)
                .with_body(response.body_text())
                .with_source(e)
        })?;

        debug!(username = self.credentials.username(), "token exchange succeeded");
        Ok(parsed.auth_token)
    }
}

impl TokenSource for PasswordTokenSource {
    fn fetch_token(&self) -> TokenFuture<'_> {
        Box::pin(self.exchange())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::TlsConfig;
    use crate::transport::AuthScheme;

    fn source(base_url: &str) -> PasswordTokenSource {
        let executor = RequestExecutor::new(
            base_url,
            Duration::from_secs(5),
            &TlsConfig::default(),
            AuthScheme::CassandraToken,
        )
        .unwrap();
        PasswordTokenSource::new(executor, PasswordCredentials::new("cassandra", "secret"))
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticTokenSource::new("AstraCS:abc");
        assert_eq!(source.fetch_token().await.unwrap(), "AstraCS:abc");
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/"))
            .and(body_json(serde_json::json!({"username": "cassandra", "password": "secret"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"authToken": "tok-A"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(source(&server.uri()).fetch_token().await.unwrap(), "tok-A");
    }

    #[tokio::test]
    async fn test_exchange_rejected_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let err = source(&server.uri()).fetch_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some("bad credentials"));
    }

    #[tokio::test]
    async fn test_exchange_unreadable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = source(&server.uri()).fetch_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.body(), Some("<html>"));
    }

    #[tokio::test]
    async fn test_exchange_transport_failure_is_auth_error() {
        let err = source("http://127.0.0.1:1").fetch_token().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(std::error::Error::source(&err).is_some());
    }
}
