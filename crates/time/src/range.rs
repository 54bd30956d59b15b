//! Local calendar ranges as instant bounds.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use horizon_core::Instant;

use crate::context::TimeContext;

const DAY_MILLIS: i64 = 86_400_000;

impl TimeContext {
    fn resolve_or_utc(&self, naive: NaiveDateTime) -> Instant {
        self.zone()
            .resolve_local(naive)
            .unwrap_or_else(|| Instant::from(naive.and_utc()))
    }

    /// First instant of a local calendar day.
    pub fn start_of_day(&self, date: NaiveDate) -> Instant {
        self.resolve_or_utc(date.and_time(NaiveTime::MIN))
    }

    /// First and last instant of a local calendar day, both inclusive.
    ///
    /// The span follows the zone's rules, so DST transition days are 23 or
    /// 25 hours long.
    pub fn day_bounds(&self, date: NaiveDate) -> (Instant, Instant) {
        let start = self.start_of_day(date);
        let end = date
            .succ_opt()
            .map(|next| self.start_of_day(next).add_millis(-1))
            .unwrap_or_else(|| start.add_millis(DAY_MILLIS - 1));
        (start, end)
    }

    /// Bounds of today in the context zone.
    pub fn today_bounds(&self) -> (Instant, Instant) {
        self.day_bounds(self.today())
    }

    /// First and last instant of a local calendar year, or `None` for a
    /// year chrono cannot represent.
    pub fn year_bounds(&self, year: i32) -> Option<(Instant, Instant)> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some((self.day_bounds(first).0, self.day_bounds(last).1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::{FixedClock, Zone};

    const HOUR: i64 = 3_600_000;

    fn context(zone: &str) -> TimeContext {
        // 2024-03-10T12:00:00Z
        TimeContext::new(Zone::parse(zone).unwrap(), FixedClock::at_millis(1_710_072_000_000))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span((start, end): (Instant, Instant)) -> i64 {
        end.as_millis() - start.as_millis() + 1
    }

    #[test]
    fn test_utc_day_is_24_hours() {
        let ctx = context("UTC");
        let (start, end) = ctx.day_bounds(date(2023, 1, 15));
        assert_eq!(start, Instant::from_millis(1_673_740_800_000));
        assert_eq!(end, Instant::from_millis(1_673_740_800_000 + DAY_MILLIS - 1));
    }

    #[test]
    fn test_dst_days_in_new_york() {
        let ctx = context("America/New_York");
        assert_eq!(span(ctx.day_bounds(date(2024, 3, 10))), 23 * HOUR);
        assert_eq!(span(ctx.day_bounds(date(2024, 11, 3))), 25 * HOUR);
        assert_eq!(span(ctx.day_bounds(date(2024, 7, 4))), 24 * HOUR);
    }

    #[test]
    fn test_lord_howe_half_hour_shift() {
        let ctx = context("Australia/Lord_Howe");
        // Clocks go back 30 minutes on 2024-04-07
        assert_eq!(span(ctx.day_bounds(date(2024, 4, 7))), 24 * HOUR + HOUR / 2);
    }

    #[test]
    fn test_consecutive_days_tile() {
        let ctx = context("Europe/Berlin");
        let (_, end) = ctx.day_bounds(date(2024, 3, 30));
        let (start, _) = ctx.day_bounds(date(2024, 3, 31));
        assert_eq!(end.add_millis(1), start);
    }

    #[test]
    fn test_today_bounds_use_clock() {
        let ctx = context("America/New_York");
        let (start, end) = ctx.today_bounds();
        assert!(start <= ctx.now() && ctx.now() <= end);
    }

    #[test]
    fn test_year_bounds() {
        let ctx = context("+05:30");
        let (start, end) = ctx.year_bounds(2024).unwrap();
        assert_eq!(start, Instant::from_millis(1_704_047_400_000));
        assert_eq!(span((start, end)), 366 * 24 * HOUR);
        assert!(ctx.year_bounds(i32::MAX).is_none());
    }
}
