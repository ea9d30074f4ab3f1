//! Session configuration: where to connect and how to authenticate.

use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;

use super::{TlsConfig, UnauthorizedPolicy};
use crate::auth::Credentials;
use crate::path::PathEncoding;

/// Default lifetime of a cached auth token (5 minutes).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(300);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ASTRA_ENDPOINT_PREFIX: &str = "https://";
const ASTRA_ENDPOINT_SUFFIX: &str = ".apps.astra.datastax.com/api/rest";

/// Builds the Astra REST endpoint for a database id and region.
///
/// ```rust
/// assert_eq!(
///     stargate::config::astra_base_url("0000-1111", "us-east1"),
///     "https://0000-1111-us-east1.apps.astra.datastax.com/api/rest"
/// );
/// ```
pub fn astra_base_url(database_id: &str, region: &str) -> String {
    format!(
        "{}{}-{}{}",
        ASTRA_ENDPOINT_PREFIX, database_id, region, ASTRA_ENDPOINT_SUFFIX
    )
}

/// Resolved, immutable configuration for one target deployment.
///
/// Build one with [`ClientConfig::builder()`] or [`ClientConfig::from_env()`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    credentials: Credentials,
    token_ttl: Duration,
    timeout: Duration,
    path_encoding: PathEncoding,
    unauthorized_policy: UnauthorizedPolicy,
    tls: TlsConfig,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the token time-to-live.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the path segment encoding policy.
    pub fn path_encoding(&self) -> PathEncoding {
        self.path_encoding
    }

    /// Returns the 401 handling policy.
    pub fn unauthorized_policy(&self) -> UnauthorizedPolicy {
        self.unauthorized_policy
    }

    /// Returns the TLS configuration.
    pub fn tls(&self) -> &TlsConfig {
        &self.tls
    }
}

/// Error returned when a [`ClientConfigBuilder`] cannot produce a config.
///
/// Every problem is reported at once rather than failing on the first.
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", self.describe())]
pub struct ConfigError {
    missing: Vec<&'static str>,
    invalid: Vec<String>,
}

impl ConfigError {
    /// Names of required settings that were not provided.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Descriptions of settings that were provided but are unusable.
    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    pub(crate) fn push_missing(&mut self, field: &'static str) {
        self.missing.push(field);
    }

    pub(crate) fn push_invalid(&mut self, problem: impl Into<String>) {
        self.invalid.push(problem.into());
    }

    fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing required settings: {}", self.missing.join(", ")));
        }
        if !self.invalid.is_empty() {
            parts.push(format!("invalid settings: {}", self.invalid.join("; ")));
        }
        parts.join("; ")
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::configuration(err.to_string()).with_source(err)
    }
}

/// Builder for [`ClientConfig`].
///
/// Either `base_url` or both `database_id` and `region` must be set, and
/// either a bearer token or a username/password pair.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use stargate::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8082")
///     .username("cassandra")
///     .password("cassandra")
///     .token_ttl(Duration::from_secs(300))
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url(), "http://localhost:8082");
///
/// let err = ClientConfig::builder().build().unwrap_err();
/// assert!(err.missing().contains(&"username"));
/// ```
#[derive(Default, Clone)]
pub struct ClientConfigBuilder {
    pub(crate) base_url: Option<String>,
    pub(crate) database_id: Option<String>,
    pub(crate) region: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<Zeroizing<String>>,
    pub(crate) bearer_token: Option<Zeroizing<String>>,
    pub(crate) token_ttl: Option<Duration>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) path_encoding: PathEncoding,
    pub(crate) unauthorized_policy: UnauthorizedPolicy,
    pub(crate) tls: TlsConfig,
    pub(crate) problems: ConfigError,
}

impl ClientConfigBuilder {
    /// Sets the base URL, overriding any Astra database id/region.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the Astra database id.
    #[must_use]
    pub fn database_id(mut self, id: impl Into<String>) -> Self {
        self.database_id = Some(id.into());
        self
    }

    /// Sets the Astra database region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    /// Sets a pre-issued token. Takes precedence over username/password.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Sets the token time-to-live.
    #[must_use]
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the path segment encoding policy.
    #[must_use]
    pub fn path_encoding(mut self, encoding: PathEncoding) -> Self {
        self.path_encoding = encoding;
        self
    }

    /// Sets the 401 handling policy.
    #[must_use]
    pub fn unauthorized_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.unauthorized_policy = policy;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Validates the settings and produces a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every missing or invalid setting.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let mut problems = self.problems;

        let base_url = match non_empty(self.base_url) {
            Some(url) => Some(url),
            None => {
                let id = non_empty(self.database_id);
                let region = non_empty(self.region);
                if id.is_none() {
                    problems.push_missing("database_id (or base_url)");
                }
                if region.is_none() {
                    problems.push_missing("region (or base_url)");
                }
                id.zip(region).map(|(id, region)| astra_base_url(&id, &region))
            },
        };

        let base_url = base_url.and_then(|url| {
            let trimmed = url.trim_end_matches('/').to_string();
            match Url::parse(&trimmed) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                    Some(trimmed)
                },
                Ok(parsed) => {
                    problems.push_invalid(format!(
                        "base_url scheme must be http or https, got '{}'",
                        parsed.scheme()
                    ));
                    None
                },
                Err(e) => {
                    problems.push_invalid(format!("base_url '{}' is not a URL: {}", trimmed, e));
                    None
                },
            }
        });

        let credentials = match self.bearer_token.filter(|t| !t.is_empty()) {
            Some(token) => Some(Credentials::bearer(token.as_str())),
            None => {
                let username = non_empty(self.username);
                let password = self.password.filter(|p| !p.is_empty());
                if username.is_none() {
                    problems.push_missing("username");
                }
                if password.is_none() {
                    problems.push_missing("password");
                }
                username
                    .zip(password)
                    .map(|(u, p)| Credentials::password(u, p.as_str()))
            },
        };

        let token_ttl = self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL);
        if token_ttl.is_zero() {
            problems.push_invalid("token_ttl must be greater than zero");
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            problems.push_invalid("timeout must be greater than zero");
        }

        match (base_url, credentials) {
            (Some(base_url), Some(credentials)) if problems.is_empty() => Ok(ClientConfig {
                base_url,
                credentials,
                token_ttl,
                timeout,
                path_encoding: self.path_encoding,
                unauthorized_policy: self.unauthorized_policy,
                tls: self.tls,
            }),
            _ => Err(problems),
        }
    }
}

impl std::fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("database_id", &self.database_id)
            .field("region", &self.region)
            .field("username", &self.username)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
