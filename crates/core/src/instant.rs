//! Instants - unambiguous points in time as epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, in milliseconds since the Unix epoch (UTC).
///
/// This is the only timezone-free representation in the system and the
/// form every temporal field takes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Instant 0, `1970-01-01T00:00:00Z`.
    pub const EPOCH: Instant = Instant(0);

    /// Create from epoch milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Epoch milliseconds.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Whether this is the epoch sentinel.
    pub const fn is_epoch(self) -> bool {
        self.0 == 0
    }

    /// Shift by a signed number of milliseconds, saturating at the `i64` range.
    pub fn add_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// As a UTC `DateTime`.
    ///
    /// Instants outside chrono's representable range collapse to the epoch;
    /// the raw millisecond value is untouched.
    pub fn to_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

impl From<i64> for Instant {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Anything that can be read back as an [`Instant`].
///
/// Implemented by both temporal representations of a goal so derived
/// computations work on wire and local goals alike.
pub trait AsInstant {
    /// The instant this value denotes.
    fn as_instant(&self) -> Instant;
}

impl AsInstant for Instant {
    fn as_instant(&self) -> Instant {
        *self
    }
}
