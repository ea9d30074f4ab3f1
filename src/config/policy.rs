//! Session policies.

/// What a session does with its cached token when a resource call is
/// rejected with HTTP 401.
///
/// Neither policy retries the rejected call; the 401 is always surfaced to the
/// caller as [`ErrorKind::Unauthorized`](crate::ErrorKind::Unauthorized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Keep serving the cached token until its TTL elapses.
    #[default]
    Keep,

    /// Drop the cached token so the next call performs a fresh exchange.
    Invalidate,
}

impl UnauthorizedPolicy {
    /// Returns `true` if a 401 should drop the cached token.
    pub fn invalidates(&self) -> bool {
        matches!(self, UnauthorizedPolicy::Invalidate)
    }
}
