//! Timezone-aware local date-time values.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::instant::{AsInstant, Instant};
use crate::zone::Zone;

/// An instant paired with the zone its calendar fields are read in.
///
/// The instant is stored untouched, so converting back never loses
/// precision or drifts across DST changes. Calendar accessors
/// (`year`, `hour`, ...) report local wall-clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    instant: Instant,
    zone: Zone,
}

impl LocalDateTime {
    /// Wrap an instant for display in `zone`.
    pub fn new(instant: Instant, zone: Zone) -> Self {
        Self { instant, zone }
    }

    /// The epoch, read in `zone`.
    pub fn epoch(zone: Zone) -> Self {
        Self::new(Instant::EPOCH, zone)
    }

    /// Build from local wall-clock fields.
    ///
    /// See [`Zone::resolve_local`] for how DST gaps and overlaps resolve.
    pub fn from_local(naive: NaiveDateTime, zone: Zone) -> Option<Self> {
        zone.resolve_local(naive).map(|instant| Self::new(instant, zone))
    }

    /// The underlying instant.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// The zone calendar fields are read in.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// The same instant read in another zone.
    pub fn with_zone(&self, zone: Zone) -> Self {
        Self::new(self.instant, zone)
    }

    /// Local wall-clock date and time.
    pub fn naive_local(&self) -> NaiveDateTime {
        self.zone.to_local(self.instant)
    }

    /// Local calendar date.
    pub fn date(&self) -> NaiveDate {
        self.naive_local().date()
    }

    /// The instant as a UTC `DateTime`.
    pub fn utc(&self) -> DateTime<Utc> {
        self.instant.to_utc()
    }

    /// Local year.
    pub fn year(&self) -> i32 {
        self.naive_local().year()
    }

    /// Local month, 1-12.
    pub fn month(&self) -> u32 {
        self.naive_local().month()
    }

    /// Local day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.naive_local().day()
    }

    /// Local hour, 0-23.
    pub fn hour(&self) -> u32 {
        self.naive_local().hour()
    }

    /// Local minute, 0-59.
    pub fn minute(&self) -> u32 {
        self.naive_local().minute()
    }
}

impl AsInstant for LocalDateTime {
    fn as_instant(&self) -> Instant {
        self.instant
    }
}

impl std::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let offset = self.zone.offset_at(self.instant);
        write!(f, "{}", self.utc().with_timezone(&offset).to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_calendar_fields_are_local() {
        // 2023-01-15T23:30Z is already the 16th in India
        let instant = Instant::from_millis(1_673_825_400_000);
        let zone = Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        let local = LocalDateTime::new(instant, zone);

        assert_eq!((local.year(), local.month(), local.day()), (2023, 1, 16));
        assert_eq!((local.hour(), local.minute()), (5, 0));
        assert_eq!(local.instant(), instant);
    }

    #[test]
    fn test_with_zone_keeps_instant() {
        let local = LocalDateTime::new(Instant::from_millis(42), Zone::Utc);
        let moved = local.with_zone(Zone::Named(chrono_tz::Pacific::Chatham));
        assert_eq!(moved.instant(), local.instant());
        assert_ne!(moved.naive_local(), local.naive_local());
    }

    #[test]
    fn test_display_is_rfc3339_with_local_offset() {
        let zone = Zone::Named(chrono_tz::America::New_York);
        let local = LocalDateTime::new(Instant::from_millis(1_673_778_600_000), zone);
        assert_eq!(local.to_string(), "2023-01-15T05:30:00-05:00");
    }
}
