//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes.
///
/// ## Caller Action
///
/// | ErrorKind         | Cause                          | Action                        |
/// |-------------------|--------------------------------|-------------------------------|
/// | `Validation`      | Bad input, HTTP 400/422        | Fix input, never retry        |
/// | `Auth`            | Credential exchange failed     | Fix credentials               |
/// | `Unauthorized`    | HTTP 401 on a resource call    | Renew token or fix grants     |
/// | `NotFound`        | HTTP 404 where one was unexpected | Resource doesn't exist     |
/// | `Server`          | Any other unexpected status    | Inspect `status()`/`body()`   |
/// | `Transport`       | Network failure                | Caller-side retry policy      |
/// | `Timeout`         | Per-request timeout elapsed    | Caller-side retry policy      |
/// | `Connection`      | DNS, TLS, connection refused   | Caller-side retry policy      |
/// | `Configuration`   | Missing or invalid settings    | Fix configuration             |
/// | `InvalidResponse` | Body could not be decoded      | Check server/schema versions  |
///
/// The SDK itself never retries; [`is_transient()`](ErrorKind::is_transient)
/// exists so callers can build their own policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed or missing input.
    ///
    /// Raised locally before any I/O (empty identifiers, broken address
    /// hierarchy, missing request body) and for HTTP 400 / 422 responses.
    #[error("validation error")]
    Validation,

    /// Credential exchange with the authentication endpoint failed.
    ///
    /// Fatal for every subsequent call until the credentials change.
    #[error("authentication failed")]
    Auth,

    /// A resource call was rejected with HTTP 401.
    #[error("unauthorized")]
    Unauthorized,

    /// Requested resource was not found.
    ///
    /// Most read paths turn 404 into `Ok(None)` / `Ok(false)`; this kind only
    /// surfaces where absence is itself a failure.
    #[error("not found")]
    NotFound,

    /// Unexpected HTTP status. The raw status and body are preserved.
    #[error("server error")]
    Server,

    /// Generic network-level failure.
    #[error("transport error")]
    Transport,

    /// Request timed out on the client side.
    #[error("timeout")]
    Timeout,

    /// Connection error (DNS, TLS handshake, connection refused).
    #[error("connection error")]
    Connection,

    /// Configuration error (invalid URL, missing credentials).
    #[error("configuration error")]
    Configuration,

    /// Response body could not be decoded.
    #[error("invalid response")]
    InvalidResponse,
}

impl ErrorKind {
    /// Returns `true` for network-level failures a caller may choose to retry.
    ///
    /// ```rust
    /// use stargate::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_transient());
    /// assert!(!ErrorKind::Validation.is_transient());
    /// ```
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Timeout | ErrorKind::Connection
        )
    }

    /// Maps an HTTP status code that was not handled as an outcome.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::Validation,
            401 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            _ => ErrorKind::Server,
        }
    }
}
