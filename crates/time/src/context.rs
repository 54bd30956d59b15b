//! Conversion context: the zone and clock every local conversion reads.

use std::sync::Arc;

use chrono::NaiveDate;
use horizon_core::{Clock, Instant, LocalDateTime, SystemClock, Zone};

/// Zone and clock for converting between instants and local values.
///
/// Both are injected, never read from process globals, so conversions
/// are deterministic under a [`horizon_core::FixedClock`].
#[derive(Clone)]
pub struct TimeContext {
    zone: Zone,
    clock: Arc<dyn Clock>,
}

impl TimeContext {
    /// Create a context reading local fields in `zone` and "now" from `clock`.
    pub fn new(zone: Zone, clock: impl Clock + 'static) -> Self {
        Self {
            zone,
            clock: Arc::new(clock),
        }
    }

    /// Host zone and real-time clock.
    pub fn system() -> Self {
        Self::new(Zone::System, SystemClock)
    }

    /// The zone local fields are read in.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Shared handle to the clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Current instant.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Current instant as a local value.
    pub fn now_local(&self) -> LocalDateTime {
        LocalDateTime::new(self.now(), self.zone)
    }

    /// Today's local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now_local().date()
    }

    /// Wrap a wire instant as a local value.
    ///
    /// No offset arithmetic happens here; the value keeps the instant and
    /// reads calendar fields through the zone. `None` stays `None`.
    pub fn decode_instant(&self, instant: Option<Instant>) -> Option<LocalDateTime> {
        instant.map(|instant| LocalDateTime::new(instant, self.zone))
    }
}

impl std::fmt::Debug for TimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeContext")
            .field("zone", &self.zone)
            .field("now", &self.now())
            .finish()
    }
}

/// Extract the wire instant from a local value. `None` stays `None`.
pub fn encode_instant(value: Option<&LocalDateTime>) -> Option<Instant> {
    value.map(LocalDateTime::instant)
}
