//! Token cache with time-to-live and single-flight renewal.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::TokenSource;
use crate::clock::{Clock, SystemClock};
use crate::{Error, ErrorKind, Result};

/// Observable state of the token cache.
///
/// ```text
/// Empty --renew--> Valid --ttl elapsed--> Stale --renew--> Valid
///                    |
///                    +--invalidate()--> Empty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been issued, or it was invalidated.
    Empty,
    /// A token is cached and younger than the TTL.
    Valid,
    /// A token is cached but its TTL has elapsed.
    Stale,
}

#[derive(Clone)]
struct CachedToken {
    value: Arc<str>,
    issued_at: Instant,
}

#[derive(Default)]
struct Renewal {
    // Epoch and error of the most recent failed exchange.
    last_failure: Option<(u64, Error)>,
}

/// Caches the token produced by a [`TokenSource`] for a fixed TTL.
///
/// The fast path only takes a read lock. When the token is missing or stale,
/// callers queue on a single renewal lock and re-check the cache once they
/// hold it, so at most one exchange is in flight per manager. Callers that
/// queued behind a failed exchange receive a copy of its error instead of
/// issuing their own.
///
/// A token is stale once `now - issued_at >= ttl`. A failed renewal leaves
/// any previous token in the cache untouched.
pub struct TokenManager {
    source: Arc<dyn TokenSource>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<CachedToken>>,
    renewal: tokio::sync::Mutex<Renewal>,
    epoch: AtomicU64,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("ttl", &self.ttl)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Creates a manager using the system clock.
    pub fn new(source: impl TokenSource + 'static, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, SystemClock)
    }

    /// Creates a manager measuring token age with `clock`.
    pub fn with_clock(
        source: impl TokenSource + 'static,
        ttl: Duration,
        clock: impl Clock,
    ) -> Self {
        Self {
            source: Arc::new(source),
            ttl,
            clock: Arc::new(clock),
            cached: RwLock::new(None),
            renewal: tokio::sync::Mutex::new(Renewal::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Returns the token time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a valid token, renewing it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Auth`] if renewal fails. Status code and body of
    /// a rejected exchange are preserved on the error.
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = self.fresh() {
            return Ok(token);
        }

        let seen = self.epoch.load(Ordering::Acquire);
        let mut renewal = self.renewal.lock().await;

        if let Some(token) = self.fresh() {
            debug!("token renewed by a concurrent caller");
            return Ok(token);
        }

        if let Some((failed_epoch, error)) = &renewal.last_failure {
            if *failed_epoch != seen && *failed_epoch == self.epoch.load(Ordering::Acquire) {
                debug!("sharing failure of concurrent token renewal");
                return Err(error.duplicate());
            }
        }

        debug!(state = ?self.state(), "renewing token");
        let result = self.source.fetch_token().await;
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;

        match result {
            Ok(token) => {
                let value: Arc<str> = Arc::from(token.as_str());
                *self.cached.write() = Some(CachedToken {
                    value,
                    issued_at: self.clock.now(),
                });
                renewal.last_failure = None;
                info!(ttl_secs = self.ttl.as_secs(), "token renewed");
                Ok(token)
            },
            Err(e) => {
                let error = into_auth_error(e);
                warn!(status = ?error.status(), error = %error, "token renewal failed");
                renewal.last_failure = Some((epoch, error.duplicate()));
                Err(error)
            },
        }
    }

    /// Drops the cached token so the next [`get_token`](Self::get_token)
    /// performs an exchange.
    pub fn invalidate(&self) {
        if self.cached.write().take().is_some() {
            debug!("cached token invalidated");
        }
    }

    /// Drops the cached token only if it is still `token`.
    ///
    /// Returns `true` if the cache was cleared. A token renewed by another
    /// caller since `token` was handed out is kept.
    pub fn invalidate_if(&self, token: &str) -> bool {
        let mut cached = self.cached.write();
        if cached.as_ref().is_some_and(|c| &*c.value == token) {
            *cached = None;
            debug!("cached token invalidated");
            true
        } else {
            false
        }
    }

    /// Returns the current cache state.
    pub fn state(&self) -> TokenState {
        match self.cached.read().as_ref() {
            None => TokenState::Empty,
            Some(cached) if self.is_fresh(cached) => TokenState::Valid,
            Some(_) => TokenState::Stale,
        }
    }

    fn fresh(&self) -> Option<String> {
        self.cached
            .read()
            .as_ref()
            .filter(|cached| self.is_fresh(cached))
            .map(|cached| cached.value.to_string())
    }

    fn is_fresh(&self, cached: &CachedToken) -> bool {
        self.clock.now().saturating_duration_since(cached.issued_at) < self.ttl
    }
}

fn into_auth_error(error: Error) -> Error {
    if error.kind() == ErrorKind::Auth {
        return error;
    }
    let mut wrapped = Error::auth(format!("token renewal failed: {}", error));
    if let Some(status) = error.status() {
        wrapped = wrapped.with_status(status);
    }
    if let Some(body) = error.body() {
        wrapped = wrapped.with_body(body);
    }
    wrapped.with_source(error)
}
