//! Manually advanced clock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to the code under test.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use stargate::clock::Clock;
/// use stargate::testing::MockClock;
///
/// let clock = MockClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(clock.now().duration_since(start), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_until_advanced() {
        let clock = MockClock::new();
        let a = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), a);
    }

    #[test]
    fn test_clones_share_time() {
        let clock = MockClock::new();
        let handle = clock.clone();
        let start = clock.now();
        handle.advance(Duration::from_secs(300));
        assert_eq!(clock.now().duration_since(start), Duration::from_secs(300));
    }
}
