//! HTTP request execution using reqwest.
//!
//! The executor attaches the auth header, enforces the per-request timeout and
//! returns every HTTP response as a [`RawResponse`]. Statuses are interpreted
//! later by [`translate`](super::translate); only network-level failures are
//! errors here.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::TlsConfig;
use crate::error::ErrorKind;
use crate::user_agent;
use crate::{Error, Result};

/// Header carrying the auth token for the document API.
pub const CASSANDRA_TOKEN_HEADER: &str = "x-cassandra-token";

/// HTTP methods used by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Returns `true` if requests with this method must carry a payload.
    pub fn requires_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// Request body.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No body.
    #[default]
    None,

    /// A serialized JSON document.
    Json(Bytes),

    /// An intentionally empty body, for action endpoints such as
    /// `POST /v2/databases/{id}/terminate`.
    Empty,
}

impl Payload {
    /// Serializes `value` as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value)
            .map(|bytes| Payload::Json(Bytes::from(bytes)))
            .map_err(|e| Error::validation(format!("cannot serialize request body: {}", e)).with_source(e))
    }

    fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }
}

/// How the token is attached to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `X-Cassandra-Token: <token>` (document API).
    #[default]
    CassandraToken,

    /// `Authorization: Bearer <token>` (DevOps API).
    Bearer,
}

impl AuthScheme {
    fn header(&self, token: &str) -> Result<(HeaderName, HeaderValue)> {
        let (name, value) = match self {
            AuthScheme::CassandraToken => (
                HeaderName::from_static(CASSANDRA_TOKEN_HEADER),
                HeaderValue::from_str(token),
            ),
            AuthScheme::Bearer => (AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))),
        };
        let mut value =
            value.map_err(|_| Error::new(ErrorKind::Auth, "auth token contains invalid header characters"))?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

/// An HTTP response, whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns a header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Sends HTTP requests against one base URL.
#[derive(Clone)]
pub struct RequestExecutor {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    auth_scheme: AuthScheme,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Creates an executor for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TLS settings cannot be applied or
    /// the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tls: &TlsConfig,
        auth_scheme: AuthScheme,
    ) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent::user_agent());

        if tls.skip_verification {
            warn!("TLS certificate verification is disabled");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref ca_cert_file) = tls.ca_cert_file {
            let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
                Error::configuration(format!("Failed to read certificate {:?}: {}", ca_cert_file, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                Error::configuration(format!("Invalid certificate {:?}: {}", ca_cert_file, e))
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        if let Some(ref ca_cert_pem) = tls.ca_cert_pem {
            let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
                Error::configuration(format!("Invalid CA certificate PEM: {}", e))
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        let client = client_builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            auth_scheme,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request and returns the response, whatever its status.
    ///
    /// `path` is appended to the base URL; `query` pairs are form-encoded.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Validation`] if a POST, PUT or PATCH has no payload, or
    ///   the URL cannot be formed. No request is sent.
    /// - [`ErrorKind::Timeout`], [`ErrorKind::Connection`] or
    ///   [`ErrorKind::Transport`] on network-level failure.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Payload,
        token: Option<&str>,
    ) -> Result<RawResponse> {
        if method.requires_body() && payload.is_none() {
            return Err(Error::validation(format!("{} {} requires a request body", method, path)));
        }

        let url = self.url(path, query)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let (name, value) = self.auth_scheme.header(token)?;
            headers.insert(name, value);
        }

        let mut request = self
            .client
            .request(method.as_reqwest(), url)
            .timeout(self.timeout);
        match payload {
            Payload::None => {},
            Payload::Json(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                request = request.body(body);
            },
            Payload::Empty => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            },
        }

        let response = request.headers(headers).send().await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed");
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(%method, path, status, bytes = body.len(), "response received");

        Ok(RawResponse::new(status, headers, body))
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            Error::validation(format!("cannot form URL from path '{}': {}", path, e)).with_source(e)
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
