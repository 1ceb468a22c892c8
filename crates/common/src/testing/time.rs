//! Time mocking utilities

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::time::Clock;

/// Mock clock for deterministic testing
///
/// Clones share the same underlying instant, so a clock handed to the
/// manager can be advanced from the test body.
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// use chrono::Duration;
/// use psnlink_common::testing::MockClock;
/// use psnlink_common::time::Clock;
///
/// let clock = MockClock::new();
/// let start = clock.now();
/// clock.advance(Duration::seconds(5));
/// assert_eq!(clock.now() - start, Duration::seconds(5));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Start at the current real time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Start at a fixed instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(instant)) }
    }

    /// Move time forward without waiting.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
