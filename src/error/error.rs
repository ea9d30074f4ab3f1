//! Main error type for the Stargate SDK.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for SDK operations.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, when a response was received)
/// ├── body: Option<String>     (raw response body, for diagnostics)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use stargate::{Error, ErrorKind};
///
/// fn report(err: &Error) {
///     match err.kind() {
///         ErrorKind::Validation => eprintln!("fix the input: {}", err),
///         ErrorKind::Server => eprintln!(
///             "unexpected HTTP {:?}: {}",
///             err.status(),
///             err.body().unwrap_or_default()
///         ),
///         kind if kind.is_transient() => eprintln!("network issue: {}", err),
///         _ => eprintln!("{}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    body: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use stargate::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Validation, "namespace cannot be empty");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Creates an error for an HTTP response that is not a success.
    ///
    /// The kind is derived from the status code; the status and body are
    /// preserved verbatim.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let kind = ErrorKind::from_http_status(status);
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };
        Self::new(kind, message).with_status(status).with_body(body)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code, if a response was received.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the raw response body, if a response was received.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` if this is a network-level failure.
    #[inline]
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// Sets the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the raw response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the source error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Copies kind, message, status and body. The source is rendered into
    /// the message since boxed sources cannot be cloned.
    pub(crate) fn duplicate(&self) -> Self {
        let message = match &self.source {
            Some(source) => Cow::Owned(format!("{} ({})", self.message, source)),
            None => self.message.clone(),
        };
        Self {
            kind: self.kind,
            message,
            status: self.status,
            body: self.body.clone(),
            source: None,
        }
    }

    // Convenience constructors for common error types

    /// Creates a validation error.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection
        } else if err.is_decode() {
            ErrorKind::InvalidResponse
        } else {
            ErrorKind::Transport
        };
        Error::new(kind, format!("HTTP request failed: {}", err)).with_source(err)
    }
}
