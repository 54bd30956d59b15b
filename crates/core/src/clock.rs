//! Wall-clock sources.

use chrono::Utc;

use crate::instant::Instant;

/// Source of the current instant.
///
/// Derived state that depends on "now" reads it through this trait so
/// tests can freeze time instead of patching the process clock.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The host's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from(Utc::now())
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl FixedClock {
    /// Freeze at `millis` since the epoch.
    pub fn at_millis(millis: i64) -> Self {
        Self(Instant::from_millis(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
