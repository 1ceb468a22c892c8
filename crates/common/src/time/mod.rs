//! Wall-clock abstraction
//!
//! Token expiry is a function of "now", so the lifecycle manager reads time
//! through [`Clock`] instead of calling `Utc::now()` directly. Production
//! code uses [`SystemClock`]; tests use `testing::MockClock`.

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
