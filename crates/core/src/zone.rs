//! Timezones used to read the local calendar fields of an instant.

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::instant::Instant;

/// Errors from parsing a zone name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    /// Not a known IANA timezone
    #[error("Invalid timezone '{0}'. Expected an IANA timezone like 'America/New_York' or 'UTC'.")]
    Unknown(String),

    /// Looked like a fixed offset but did not parse as one
    #[error("Invalid UTC offset '{0}'. Expected a form like '+05:30' or '-0800'.")]
    InvalidOffset(String),
}

/// A timezone.
///
/// Zones are plain values: every conversion takes the zone explicitly,
/// nothing here reads or mutates process-wide state except [`Zone::System`],
/// which asks the host for its local offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    /// Coordinated Universal Time
    #[default]
    Utc,
    /// A fixed offset east of UTC, possibly fractional (`+05:30`)
    Fixed(FixedOffset),
    /// An IANA named zone with DST rules
    Named(Tz),
    /// The host's configured local zone
    System,
}

impl Zone {
    /// Parse a zone name.
    ///
    /// Empty input and any casing of `utc` mean UTC. `system`/`local` select
    /// the host zone, a leading sign selects a fixed offset, and anything
    /// else must be an IANA name.
    pub fn parse(name: &str) -> Result<Self, ZoneError> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("utc") || name == "Z" {
            return Ok(Zone::Utc);
        }
        if name.eq_ignore_ascii_case("system") || name.eq_ignore_ascii_case("local") {
            return Ok(Zone::System);
        }
        if name.starts_with('+') || name.starts_with('-') {
            return name
                .parse::<FixedOffset>()
                .map(Zone::Fixed)
                .map_err(|_| ZoneError::InvalidOffset(name.to_string()));
        }

        name.parse::<Tz>().map(Zone::Named).map_err(|_| {
            tracing::debug!("Rejected timezone name: {}", name);
            ZoneError::Unknown(name.to_string())
        })
    }

    /// The UTC offset in effect at `instant`.
    pub fn offset_at(&self, instant: Instant) -> FixedOffset {
        let utc = instant.to_utc().naive_utc();
        match self {
            Zone::Utc => Utc.fix(),
            Zone::Fixed(offset) => *offset,
            Zone::Named(tz) => tz.offset_from_utc_datetime(&utc).fix(),
            Zone::System => Local.offset_from_utc_datetime(&utc),
        }
    }

    /// Wall-clock fields of `instant` in this zone.
    pub fn to_local(&self, instant: Instant) -> NaiveDateTime {
        instant
            .to_utc()
            .with_timezone(&self.offset_at(instant))
            .naive_local()
    }

    /// The instant a wall-clock time denotes in this zone.
    ///
    /// An ambiguous time (the repeated hour when clocks fall back) resolves
    /// to the earlier instant. A time inside a spring-forward gap is moved
    /// forward by the length of the gap: one hour in most zones, thirty
    /// minutes on Lord Howe Island. Returns `None` only if the shifted time
    /// is not representable.
    pub fn resolve_local(&self, naive: NaiveDateTime) -> Option<Instant> {
        match self.lookup(&naive) {
            LocalResult::Single(instant) => Some(instant),
            LocalResult::Ambiguous(a, b) => Some(a.min(b)),
            LocalResult::None => {
                // Read with the offset in force a day earlier, i.e. before the gap.
                let day_before = naive.checked_sub_signed(Duration::days(1))?;
                let before = self.offset_at(Instant::from(day_before.and_utc()));
                let offset = Duration::seconds(i64::from(before.local_minus_utc()));
                let Some(utc) = naive.checked_sub_signed(offset) else {
                    tracing::debug!("No instant for local time {} in {}", naive, self);
                    return None;
                };
                Some(Instant::from(utc.and_utc()))
            }
        }
    }

    fn lookup(&self, naive: &NaiveDateTime) -> LocalResult<Instant> {
        fn to_instant<Z: TimeZone>(dt: DateTime<Z>) -> Instant {
            Instant::from(dt.with_timezone(&Utc))
        }

        match self {
            Zone::Utc => LocalResult::Single(Instant::from(naive.and_utc())),
            Zone::Fixed(offset) => offset.from_local_datetime(naive).map(to_instant),
            Zone::Named(tz) => tz.from_local_datetime(naive).map(to_instant),
            Zone::System => Local.from_local_datetime(naive).map(to_instant),
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Utc => write!(f, "UTC"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
            Zone::Named(tz) => write!(f, "{}", tz.name()),
            Zone::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::parse(s)
    }
}
