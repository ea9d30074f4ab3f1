//! Monotonic time source used for token expiry.
//!
//! Token age is measured against a [`Clock`] rather than [`Instant::now`]
//! directly so that expiry can be driven deterministically in tests (see
//! [`MockClock`](crate::testing::MockClock)).

use std::sync::Arc;
use std::time::Instant;

/// Source of monotonic time.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_arc_clock_delegates() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let before = Instant::now();
        assert!(clock.now() >= before);
    }
}
