//! Form-field input parsing and formatting.
//!
//! Input strings use the HTML date/time control formats and are always
//! read and written in LOCAL calendar fields of the context zone.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use horizon_core::{LocalDateTime, Zone};
use regex::Regex;

use crate::context::TimeContext;

/// Shape of a formatted input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
    /// `YYYY-MM-DDTHH:MM`
    DateTime,
}

/// How to interpret an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    /// Date at local midnight
    Date,
    /// Date at local `23:59:59.999`, for inclusive upper bounds
    EndDate,
    /// Time of day on today's local date
    Time,
    /// Date and time joined by `T`
    DateTime,
}

impl std::str::FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(InputKind::Date),
            "time" => Ok(InputKind::Time),
            "datetime" => Ok(InputKind::DateTime),
            other => Err(format!("unknown input kind: {}", other)),
        }
    }
}

impl std::str::FromStr for ParseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(ParseKind::Date),
            "end-date" => Ok(ParseKind::EndDate),
            "time" => Ok(ParseKind::Time),
            "datetime" => Ok(ParseKind::DateTime),
            other => Err(format!("unknown parse kind: {}", other)),
        }
    }
}

/// Why an input string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Nothing to parse
    #[error("empty input")]
    Empty,

    /// Wrong number of components or non-numeric components
    #[error("malformed {kind} input '{input}'")]
    Malformed {
        /// Which grammar was expected
        kind: &'static str,
        /// The rejected input
        input: String,
    },

    /// A component outside its calendar range
    #[error("{field} out of range in '{input}'")]
    OutOfRange {
        /// The offending component
        field: &'static str,
        /// The rejected input
        input: String,
    },

    /// The wall-clock time has no instant in the zone
    #[error("local time {0} cannot be resolved in {1}")]
    Unresolvable(NaiveDateTime, Zone),
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,6})-(\d{1,2})-(\d{1,2})$").expect("date pattern is valid")
    })
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{1,2})$").expect("time pattern is valid")
    })
}

fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let malformed = || InputError::Malformed {
        kind: "date",
        input: input.to_string(),
    };
    let caps = date_pattern().captures(input).ok_or_else(malformed)?;

    let year: i32 = caps[1].parse().map_err(|_| malformed())?;
    let month: u32 = caps[2].parse().map_err(|_| malformed())?;
    let day: u32 = caps[3].parse().map_err(|_| malformed())?;

    if !(1..=12).contains(&month) {
        return Err(InputError::OutOfRange {
            field: "month",
            input: input.to_string(),
        });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| InputError::OutOfRange {
        field: "day",
        input: input.to_string(),
    })
}

fn parse_time(input: &str) -> Result<NaiveTime, InputError> {
    let malformed = || InputError::Malformed {
        kind: "time",
        input: input.to_string(),
    };
    let caps = time_pattern().captures(input).ok_or_else(malformed)?;

    let hour: u32 = caps[1].parse().map_err(|_| malformed())?;
    let minute: u32 = caps[2].parse().map_err(|_| malformed())?;

    if hour > 23 {
        return Err(InputError::OutOfRange {
            field: "hour",
            input: input.to_string(),
        });
    }
    if minute > 59 {
        return Err(InputError::OutOfRange {
            field: "minute",
            input: input.to_string(),
        });
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Format a local value for an input control.
///
/// Uses the value's local calendar fields, zero-padded. Years past 9999
/// are written unsigned so they parse back. Returns an empty string for
/// `None`.
pub fn format_for_input(value: Option<&LocalDateTime>, kind: InputKind) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let local = value.naive_local();
    let date = || format!("{:04}-{:02}-{:02}", local.year(), local.month(), local.day());
    let time = || format!("{:02}:{:02}", local.hour(), local.minute());
    match kind {
        InputKind::Date => date(),
        InputKind::Time => time(),
        InputKind::DateTime => format!("{}T{}", date(), time()),
    }
}

impl TimeContext {
    /// Parse an input string into a local value, reporting why it failed.
    pub fn try_parse_from_input(
        &self,
        input: &str,
        kind: ParseKind,
    ) -> Result<LocalDateTime, InputError> {
        if input.is_empty() {
            return Err(InputError::Empty);
        }

        let naive = match kind {
            ParseKind::Date => parse_date(input)?.and_time(NaiveTime::MIN),
            ParseKind::EndDate => parse_date(input)?
                .and_hms_milli_opt(23, 59, 59, 999)
                .ok_or_else(|| InputError::OutOfRange {
                    field: "day",
                    input: input.to_string(),
                })?,
            ParseKind::Time => self.today().and_time(parse_time(input)?),
            ParseKind::DateTime => {
                let (date, time) = input
                    .split_once('T')
                    .filter(|(_, time)| !time.contains('T'))
                    .ok_or_else(|| InputError::Malformed {
                        kind: "datetime",
                        input: input.to_string(),
                    })?;
                parse_date(date)?.and_time(parse_time(time)?)
            }
        };

        LocalDateTime::from_local(naive, self.zone())
            .ok_or(InputError::Unresolvable(naive, self.zone()))
    }

    /// Parse an input string into a local value.
    ///
    /// Malformed input yields the epoch (Instant 0) rather than an error, so
    /// a bad field can never take a view down. Callers that must tell bad
    /// input from a genuine epoch use [`TimeContext::try_parse_from_input`].
    pub fn parse_from_input(&self, input: &str, kind: ParseKind) -> LocalDateTime {
        self.try_parse_from_input(input, kind).unwrap_or_else(|err| {
            tracing::debug!("Falling back to epoch: {}", err);
            LocalDateTime::epoch(self.zone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::{FixedClock, Instant};

    // 2023-01-15T10:30:00Z
    const NOW: i64 = 1_673_778_600_000;

    fn context(zone: &str) -> TimeContext {
        TimeContext::new(Zone::parse(zone).unwrap(), FixedClock::at_millis(NOW))
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> Instant {
        Instant::from(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_milli_opt(h, min, s, ms)
                .unwrap()
                .and_utc(),
        )
    }

    #[test]
    fn test_format_uses_local_fields() {
        let ctx = context("America/New_York");
        let value = ctx.decode_instant(Some(Instant::from_millis(NOW)));

        assert_eq!(format_for_input(value.as_ref(), InputKind::Date), "2023-01-15");
        assert_eq!(format_for_input(value.as_ref(), InputKind::Time), "05:30");
        assert_eq!(format_for_input(value.as_ref(), InputKind::DateTime), "2023-01-15T05:30");
    }

    #[test]
    fn test_format_none_is_empty() {
        assert_eq!(format_for_input(None, InputKind::DateTime), "");
    }

    #[test]
    fn test_format_zero_pads() {
        let ctx = context("UTC");
        let value = ctx.decode_instant(Some(utc(2024, 3, 5, 7, 4, 0, 0)));
        assert_eq!(format_for_input(value.as_ref(), InputKind::DateTime), "2024-03-05T07:04");
    }

    #[test]
    fn test_parse_date_is_local_midnight() {
        let ctx = context("America/New_York");
        let parsed = ctx.parse_from_input("2023-01-15", ParseKind::Date);
        assert_eq!(parsed.instant(), utc(2023, 1, 15, 5, 0, 0, 0));
        assert_eq!(format_for_input(Some(&parsed), InputKind::Time), "00:00");
    }

    #[test]
    fn test_parse_end_date_is_last_millisecond() {
        let ctx = context("UTC");
        let parsed = ctx.parse_from_input("2023-01-15", ParseKind::EndDate);
        assert_eq!(parsed.instant(), utc(2023, 1, 15, 23, 59, 59, 999));
    }

    #[test]
    fn test_parse_time_uses_todays_local_date() {
        let ctx = context("America/New_York");
        let parsed = ctx.parse_from_input("14:05", ParseKind::Time);
        assert_eq!(parsed.instant(), utc(2023, 1, 15, 19, 5, 0, 0));
    }

    #[test]
    fn test_parse_datetime_fractional_offset() {
        let ctx = context("+05:30");
        let parsed = ctx.parse_from_input("2023-01-16T05:00", ParseKind::DateTime);
        assert_eq!(parsed.instant(), utc(2023, 1, 15, 23, 30, 0, 0));
    }

    #[test]
    fn test_parse_datetime_in_dst_gap_moves_forward() {
        let ctx = context("America/New_York");
        let parsed = ctx.parse_from_input("2024-03-10T02:30", ParseKind::DateTime);
        assert_eq!(format_for_input(Some(&parsed), InputKind::DateTime), "2024-03-10T03:30");
    }

    #[test]
    fn test_parse_datetime_in_overlap_takes_earlier() {
        let ctx = context("America/New_York");
        let parsed = ctx.parse_from_input("2024-11-03T01:30", ParseKind::DateTime);
        assert_eq!(parsed.instant(), utc(2024, 11, 3, 5, 30, 0, 0));
    }

    #[test]
    fn test_malformed_input_yields_epoch() {
        let ctx = context("America/New_York");
        let cases = [
            ("not-a-date", ParseKind::Date),
            ("25:99", ParseKind::Time),
            ("", ParseKind::DateTime),
            ("2023-13-01", ParseKind::Date),
            ("2023-02-30", ParseKind::EndDate),
            ("2023-01", ParseKind::Date),
            ("10:30:00", ParseKind::Time),
            ("12:60", ParseKind::Time),
            ("2023-01-15T", ParseKind::DateTime),
            ("2023-01-15 10:30", ParseKind::DateTime),
            ("2023-01-15T10:30T00", ParseKind::DateTime),
        ];

        for (input, kind) in cases {
            let parsed = ctx.parse_from_input(input, kind);
            assert_eq!(parsed.instant(), Instant::EPOCH, "{:?} as {:?}", input, kind);
        }
    }

    #[test]
    fn test_try_parse_reports_reason() {
        let ctx = context("UTC");
        assert_eq!(ctx.try_parse_from_input("", ParseKind::Date), Err(InputError::Empty));
        assert!(matches!(
            ctx.try_parse_from_input("25:00", ParseKind::Time),
            Err(InputError::OutOfRange { field: "hour", .. })
        ));
        assert!(matches!(
            ctx.try_parse_from_input("2023-1x-01", ParseKind::Date),
            Err(InputError::Malformed { kind: "date", .. })
        ));
    }

    #[test]
    fn test_format_then_parse_preserves_minute() {
        for zone in ["UTC", "America/New_York", "Asia/Kathmandu", "Australia/Lord_Howe"] {
            let ctx = context(zone);
            for millis in [NOW, NOW + 37_123, 1_700_000_000_000, 946_684_799_999] {
                let value = LocalDateTime::new(Instant::from_millis(millis), ctx.zone());
                let text = format_for_input(Some(&value), InputKind::DateTime);
                let parsed = ctx.parse_from_input(&text, ParseKind::DateTime);

                let truncated = millis - millis.rem_euclid(60_000);
                assert_eq!(parsed.instant().as_millis(), truncated, "{} in {}", text, zone);
            }
        }
    }

    #[test]
    fn test_five_digit_year_round_trips() {
        let ctx = context("UTC");
        // 10000-01-01T00:00:00Z
        let value = LocalDateTime::new(Instant::from_millis(253_402_300_800_000), ctx.zone());
        let text = format_for_input(Some(&value), InputKind::DateTime);
        assert_eq!(text, "10000-01-01T00:00");

        let parsed = ctx.parse_from_input(&text, ParseKind::DateTime);
        assert_eq!(parsed.instant(), Instant::from_millis(253_402_300_800_000));
    }

    #[test]
    fn test_kinds_parse_from_str() {
        assert_eq!("end-date".parse::<ParseKind>().unwrap(), ParseKind::EndDate);
        assert_eq!("datetime".parse::<InputKind>().unwrap(), InputKind::DateTime);
        assert!("week".parse::<InputKind>().is_err());
    }
}
