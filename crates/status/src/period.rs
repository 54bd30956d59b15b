//! Weekly, monthly and yearly rollups of daily scores.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use horizon_core::{AsInstant, Goal};
use horizon_time::TimeContext;
use serde::{Deserialize, Serialize};

use crate::breakdown::{year_scores, DailyStats};

/// Days on either side of the centre day in a smoothing window.
pub const SMOOTHING_RADIUS: i64 = 3;

/// Weighted completion over a calendar period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// `2024-W01`, `2024-01` or `2024`
    pub period: String,
    /// `weighted_completed / weighted_total`, 0 without weight
    pub completion_rate: f64,
    /// Events in the period
    pub total_events: usize,
    /// Completed events in the period
    pub completed_events: usize,
    /// Days with at least one event
    pub days_with_tasks: usize,
    /// Days with events where none was completed
    pub days_with_no_tasks_complete: usize,
    /// Sum of priority weights
    pub weighted_total: u64,
    /// Sum of priority weights of completed events
    pub weighted_completed: u64,
}

impl PeriodStats {
    fn empty(period: String) -> Self {
        Self {
            period,
            completion_rate: 0.0,
            total_events: 0,
            completed_events: 0,
            days_with_tasks: 0,
            days_with_no_tasks_complete: 0,
            weighted_total: 0,
            weighted_completed: 0,
        }
    }

    fn absorb(&mut self, day: &DailyStats) {
        self.total_events += day.total_events;
        self.completed_events += day.completed_events;
        self.weighted_total += day.weighted_total;
        self.weighted_completed += day.weighted_completed;

        if day.total_events > 0 {
            self.days_with_tasks += 1;
            if day.completed_events == 0 {
                self.days_with_no_tasks_complete += 1;
            }
        }

        self.completion_rate = if self.weighted_total > 0 {
            self.weighted_completed as f64 / self.weighted_total as f64
        } else {
            0.0
        };
    }
}

/// One point of a smoothed completion series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    /// Centre day of the window
    pub date: NaiveDate,
    /// Completed over total events inside the window
    pub completion_rate: f64,
}

/// A year of daily scores together with its rollups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedStats {
    /// Calendar year in the context zone
    pub year: i32,
    /// One row per local day
    pub daily_stats: Vec<DailyStats>,
    /// One row per ISO week touched by the year
    pub weekly_stats: Vec<PeriodStats>,
    /// One row per month
    pub monthly_stats: Vec<PeriodStats>,
    /// The whole year
    pub yearly_stats: PeriodStats,
}

fn aggregate(days: &[DailyStats], key: impl Fn(NaiveDate) -> String) -> Vec<PeriodStats> {
    let mut periods: BTreeMap<String, PeriodStats> = BTreeMap::new();
    for day in days {
        let period = key(day.date);
        periods
            .entry(period.clone())
            .or_insert_with(|| PeriodStats::empty(period))
            .absorb(day);
    }
    periods.into_values().collect()
}

/// Roll daily scores up by ISO week (`YYYY-Www`).
///
/// Weeks are keyed by ISO week-year, so the first days of January can
/// belong to the last week of the previous year.
pub fn weekly_stats(days: &[DailyStats]) -> Vec<PeriodStats> {
    aggregate(days, |date| {
        let week = date.iso_week();
        format!("{}-W{:02}", week.year(), week.week())
    })
}

/// Roll daily scores up by calendar month (`YYYY-MM`).
pub fn monthly_stats(days: &[DailyStats]) -> Vec<PeriodStats> {
    aggregate(days, |date| format!("{}-{:02}", date.year(), date.month()))
}

/// Roll every given day into a single period labelled `year`.
pub fn yearly_stats(days: &[DailyStats], year: i32) -> PeriodStats {
    days.iter()
        .fold(PeriodStats::empty(year.to_string()), |mut stats, day| {
            stats.absorb(day);
            stats
        })
}

/// Completion smoothed over a centred seven-day window.
///
/// Produces one point per day from `start` to `end` inclusive. Each point
/// is the plain completed/total ratio of every event within
/// [`SMOOTHING_RADIUS`] days of it, or 0 when the window is empty.
pub fn smoothed_completion(
    days: &[DailyStats],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SmoothedPoint> {
    let counts: HashMap<NaiveDate, (usize, usize)> = days
        .iter()
        .map(|day| (day.date, (day.total_events, day.completed_events)))
        .collect();

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let (total, completed) = (-SMOOTHING_RADIUS..=SMOOTHING_RADIUS)
                .filter_map(|offset| date.checked_add_signed(Duration::days(offset)))
                .filter_map(|day| counts.get(&day))
                .fold((0, 0), |(t, c), (total, completed)| (t + total, c + completed));

            SmoothedPoint {
                date,
                completion_rate: if total > 0 {
                    completed as f64 / total as f64
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Daily scores for `year` with weekly, monthly and yearly rollups.
pub fn extended_stats<T: AsInstant>(
    ctx: &TimeContext,
    goals: &[Goal<T>],
    year: i32,
) -> ExtendedStats {
    let daily_stats = year_scores(ctx, goals, year);
    tracing::debug!("Rolling up {} days of {}", daily_stats.len(), year);

    ExtendedStats {
        year,
        weekly_stats: weekly_stats(&daily_stats),
        monthly_stats: monthly_stats(&daily_stats),
        yearly_stats: yearly_stats(&daily_stats, year),
        daily_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_core::{FixedClock, Instant, ResolutionStatus, WireGoal, Zone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, total: usize, completed: usize) -> DailyStats {
        // every event weighs 2
        let mut stats = DailyStats::empty(date);
        for i in 0..total {
            stats.add(2, i < completed);
        }
        stats
    }

    #[test]
    fn test_weekly_stats_use_iso_weeks() {
        let days = vec![
            // Friday 2021-01-01 is in 2020-W53
            day(date(2021, 1, 1), 2, 1),
            day(date(2021, 1, 3), 1, 0),
            day(date(2021, 1, 4), 1, 1),
            day(date(2021, 1, 5), 0, 0),
        ];

        let weeks = weekly_stats(&days);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].period, "2020-W53");
        assert_eq!((weeks[0].total_events, weeks[0].completed_events), (3, 1));
        assert_eq!(weeks[0].days_with_tasks, 2);
        assert_eq!(weeks[0].days_with_no_tasks_complete, 1);
        assert_eq!(weeks[1].period, "2021-W01");
        assert_eq!(weeks[1].days_with_tasks, 1);
        assert_eq!(weeks[1].completion_rate, 1.0);
    }

    #[test]
    fn test_monthly_and_yearly_stats() {
        let days = vec![
            day(date(2023, 1, 31), 4, 1),
            day(date(2023, 2, 1), 2, 2),
            day(date(2023, 2, 2), 0, 0),
        ];

        let months = monthly_stats(&days);
        let labels: Vec<&str> = months.iter().map(|m| m.period.as_str()).collect();
        assert_eq!(labels, vec!["2023-01", "2023-02"]);
        assert_eq!(months[0].completion_rate, 0.25);
        assert_eq!(months[1].days_with_tasks, 1);

        let year = yearly_stats(&days, 2023);
        assert_eq!(year.period, "2023");
        assert_eq!((year.weighted_total, year.weighted_completed), (12, 6));
        assert_eq!(year.completion_rate, 0.5);
        assert_eq!(year.days_with_no_tasks_complete, 0);
    }

    #[test]
    fn test_empty_period_rate_is_zero() {
        let year = yearly_stats(&[], 2023);
        assert_eq!(year.completion_rate, 0.0);
        assert_eq!(year.days_with_tasks, 0);
    }

    #[test]
    fn test_smoothed_completion_window() {
        let days = vec![day(date(2023, 1, 10), 4, 4), day(date(2023, 1, 13), 4, 0)];

        let points = smoothed_completion(&days, date(2023, 1, 5), date(2023, 1, 17));
        assert_eq!(points.len(), 13);

        let rate_on = |d: u32| {
            points
                .iter()
                .find(|p| p.date == date(2023, 1, d))
                .map(|p| p.completion_rate)
                .unwrap()
        };
        assert_eq!(rate_on(6), 0.0);
        assert_eq!(rate_on(7), 1.0);
        assert_eq!(rate_on(10), 0.5);
        assert_eq!(rate_on(13), 0.5);
        assert_eq!(rate_on(14), 0.0);
        assert_eq!(rate_on(16), 0.0);
    }

    #[test]
    fn test_extended_stats_cover_the_year() {
        // 2023-01-15T10:30:00Z
        let at = 1_673_778_600_000;
        let ctx = TimeContext::new(Zone::Utc, FixedClock::at_millis(at + 86_400_000));
        let goals = vec![WireGoal {
            scheduled_timestamp: Some(Instant::from_millis(at)),
            resolution_status: Some(ResolutionStatus::Completed),
            priority: Some("high".to_string()),
            ..Default::default()
        }];

        let stats = extended_stats(&ctx, &goals, 2023);
        assert_eq!(stats.daily_stats.len(), 365);
        assert_eq!(stats.monthly_stats.len(), 12);
        // 2023 starts in 2022-W52 and ends in 2023-W52
        assert_eq!(stats.weekly_stats.len(), 53);
        assert_eq!(stats.weekly_stats[0].period, "2022-W52");
        assert_eq!(stats.yearly_stats.completed_events, 1);
        assert_eq!(stats.yearly_stats.completion_rate, 1.0);
    }
}
