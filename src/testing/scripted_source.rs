//! Token source with scripted results.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::Error;
use crate::auth::{TokenFuture, TokenSource};

/// A [`TokenSource`] that replays a script of tokens and errors.
///
/// Each exchange pops the next scripted result; once the script is exhausted
/// every exchange fails with an auth error. An optional delay makes
/// exchanges slow enough for concurrent callers to pile up.
///
/// ## Example
///
/// ```rust
/// use stargate::Error;
/// use stargate::testing::ScriptedTokenSource;
///
/// let source = ScriptedTokenSource::new()
///     .then_token("tok-A")
///     .then_error(Error::auth("rejected").with_status(401));
/// assert_eq!(source.calls(), 0);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTokenSource {
    script: Mutex<VecDeque<Result<String, Error>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedTokenSource {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful exchange.
    #[must_use]
    pub fn then_token(self, token: impl Into<String>) -> Self {
        self.script.lock().push_back(Ok(token.into()));
        self
    }

    /// Appends a failed exchange.
    #[must_use]
    pub fn then_error(self, error: Error) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Delays every exchange by `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of exchanges performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenSource for ScriptedTokenSource {
    fn fetch_token(&self) -> TokenFuture<'_> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::auth("token script exhausted")))
        })
    }
}
