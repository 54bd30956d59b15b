//! Completion breakdowns for statistics views.
//!
//! Unlike [`crate::weighted_completion`], these follow the analytics
//! rules: skipped and deleted goals are left out entirely and only
//! `completed` counts as done.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use horizon_core::{AsInstant, Goal, LocalDateTime, Priority, ResolutionStatus};
use horizon_time::TimeContext;
use serde::{Deserialize, Serialize};

/// Assumed event length when a goal has no duration, in minutes.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

const MINUTE_MILLIS: i64 = 60_000;

/// Completion for one priority label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityStats {
    /// Priority label as found on the goals
    pub priority: String,
    /// `completed_events / total_events`
    pub completion_rate: f64,
    /// Goals with this priority
    pub total_events: usize,
    /// Completed goals with this priority
    pub completed_events: usize,
}

/// Completion for events of similar length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    /// Bucket label such as `16-30 min` or `1-2 hours`
    pub duration_range: String,
    /// `completed_events / total_events`
    pub completion_rate: f64,
    /// Events in this bucket
    pub total_events: usize,
    /// Completed events in this bucket
    pub completed_events: usize,
    /// Mean event length in minutes
    pub avg_duration_minutes: f64,
}

/// Completion split by where events come from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceStats {
    /// Events generated by routines
    pub routine_events: SourceBreakdown,
    /// Events scheduled from tasks
    pub task_events: SourceBreakdown,
}

/// Completion for one event source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceBreakdown {
    /// `completed_events / total_events`
    pub completion_rate: f64,
    /// Events from this source
    pub total_events: usize,
    /// Completed events from this source
    pub completed_events: usize,
    /// Mean priority weight
    pub avg_priority_weight: f64,
}

/// Weighted completion for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Local date
    pub date: NaiveDate,
    /// `weighted_completed / weighted_total`, 0 without weight
    pub score: f64,
    /// Events that day
    pub total_events: usize,
    /// Completed events that day
    pub completed_events: usize,
    /// Sum of priority weights
    pub weighted_total: u64,
    /// Sum of priority weights of completed events
    pub weighted_completed: u64,
}

impl DailyStats {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            score: 0.0,
            total_events: 0,
            completed_events: 0,
            weighted_total: 0,
            weighted_completed: 0,
        }
    }

    pub(crate) fn add(&mut self, weight: u64, completed: bool) {
        self.total_events += 1;
        self.weighted_total += weight;
        if completed {
            self.completed_events += 1;
            self.weighted_completed += weight;
        }
        self.score = if self.weighted_total > 0 {
            self.weighted_completed as f64 / self.weighted_total as f64
        } else {
            0.0
        };
    }
}

fn rate(completed: usize, total: usize) -> f64 {
    if total > 0 {
        completed as f64 / total as f64
    } else {
        0.0
    }
}

fn counted<T>(goals: &[Goal<T>]) -> impl Iterator<Item = &Goal<T>> {
    goals
        .iter()
        .filter(|goal| goal.resolution() != ResolutionStatus::Skipped)
        .filter(|goal| goal.is_deleted != Some(true))
}

fn is_completed<T>(goal: &Goal<T>) -> bool {
    goal.resolution() == ResolutionStatus::Completed
}

/// Completion per priority label.
///
/// Missing priorities are bucketed as `medium`. Rows are ordered `none`,
/// `low`, `medium`, `high`, then unrecognized labels alphabetically.
pub fn priority_breakdown<T>(goals: &[Goal<T>]) -> Vec<PriorityStats> {
    let mut buckets: HashMap<&str, (usize, usize)> = HashMap::new();

    for goal in counted(goals) {
        let label = goal.priority.as_deref().unwrap_or(Priority::Medium.as_str());
        let entry = buckets.entry(label).or_insert((0, 0));
        entry.0 += 1;
        if is_completed(goal) {
            entry.1 += 1;
        }
    }

    let mut stats: Vec<PriorityStats> = buckets
        .into_iter()
        .map(|(priority, (total, completed))| PriorityStats {
            priority: priority.to_string(),
            completion_rate: rate(completed, total),
            total_events: total,
            completed_events: completed,
        })
        .collect();

    let rank = |label: &str| {
        Priority::parse(label)
            .and_then(|p| Priority::ALL.iter().position(|q| *q == p))
            .unwrap_or(Priority::ALL.len())
    };
    stats.sort_by(|a, b| {
        rank(&a.priority)
            .cmp(&rank(&b.priority))
            .then_with(|| a.priority.cmp(&b.priority))
    });
    stats
}

const DURATION_BUCKETS: [(i64, &str); 5] = [
    (15, "0-15 min"),
    (30, "16-30 min"),
    (60, "31-60 min"),
    (120, "1-2 hours"),
    (240, "2-4 hours"),
];
const LONGEST_BUCKET: &str = "4+ hours";

/// Length of an event in whole minutes.
///
/// Taken from `end_timestamp` when it falls after `scheduled_timestamp`,
/// otherwise from `duration` (60 when unset).
fn event_minutes<T: AsInstant>(goal: &Goal<T>) -> i64 {
    let scheduled = goal.scheduled_timestamp.as_ref().map(T::as_instant);
    let end = goal.end_timestamp.as_ref().map(T::as_instant);
    match (scheduled, end) {
        (Some(scheduled), Some(end)) if end > scheduled => {
            (end.as_millis() - scheduled.as_millis()) / MINUTE_MILLIS
        }
        _ => goal.duration.map(i64::from).unwrap_or(DEFAULT_DURATION_MINUTES),
    }
}

fn duration_bucket(minutes: i64) -> &'static str {
    if minutes < 0 {
        return LONGEST_BUCKET;
    }
    DURATION_BUCKETS
        .iter()
        .find(|(upper, _)| minutes <= *upper)
        .map(|(_, label)| *label)
        .unwrap_or(LONGEST_BUCKET)
}

/// Completion grouped by event length.
///
/// Buckets run from `0-15 min` to `4+ hours`; empty buckets are omitted
/// and rows come shortest first.
pub fn duration_breakdown<T: AsInstant>(goals: &[Goal<T>]) -> Vec<DurationStats> {
    // label -> (total, completed, summed minutes)
    let mut buckets: HashMap<&str, (usize, usize, i64)> = HashMap::new();

    for goal in counted(goals) {
        let minutes = event_minutes(goal);
        let entry = buckets.entry(duration_bucket(minutes)).or_insert((0, 0, 0));
        entry.0 += 1;
        if is_completed(goal) {
            entry.1 += 1;
        }
        entry.2 += minutes;
    }

    let rank = |label: &str| {
        DURATION_BUCKETS
            .iter()
            .position(|(_, l)| *l == label)
            .unwrap_or(DURATION_BUCKETS.len())
    };
    let mut stats: Vec<DurationStats> = buckets
        .into_iter()
        .map(|(label, (total, completed, minutes))| DurationStats {
            duration_range: label.to_string(),
            completion_rate: rate(completed, total),
            total_events: total,
            completed_events: completed,
            avg_duration_minutes: minutes as f64 / total as f64,
        })
        .collect();
    stats.sort_by_key(|row| rank(&row.duration_range));
    stats
}

/// Completion of routine-sourced versus task-sourced events.
///
/// The source is the event's `parent_type`; events with any other parent
/// are ignored.
pub fn source_breakdown<T>(goals: &[Goal<T>]) -> SourceStats {
    // (total, completed, summed weight)
    let mut routine = (0usize, 0usize, 0u64);
    let mut task = (0usize, 0usize, 0u64);

    for goal in counted(goals) {
        let bucket = match goal.parent_type.as_deref() {
            Some("routine") => &mut routine,
            Some("task") => &mut task,
            _ => continue,
        };
        bucket.0 += 1;
        if is_completed(goal) {
            bucket.1 += 1;
        }
        bucket.2 += u64::from(goal.weight());
    }

    let summarize = |(total, completed, weight): (usize, usize, u64)| SourceBreakdown {
        completion_rate: rate(completed, total),
        total_events: total,
        completed_events: completed,
        avg_priority_weight: if total > 0 {
            weight as f64 / total as f64
        } else {
            0.0
        },
    };

    SourceStats {
        routine_events: summarize(routine),
        task_events: summarize(task),
    }
}

fn bucket_by_day<T: AsInstant>(
    ctx: &TimeContext,
    goals: &[Goal<T>],
) -> BTreeMap<NaiveDate, DailyStats> {
    let now = ctx.now();
    let mut days: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();
    let mut unfinished = 0usize;

    for goal in counted(goals) {
        let Some(scheduled) = goal.scheduled_timestamp.as_ref().map(T::as_instant) else {
            continue;
        };

        let minutes = goal
            .duration
            .map(i64::from)
            .unwrap_or(DEFAULT_DURATION_MINUTES);
        if scheduled.add_millis(minutes.saturating_mul(MINUTE_MILLIS)) > now {
            unfinished += 1;
            continue;
        }

        let date = LocalDateTime::new(scheduled, ctx.zone()).date();
        days.entry(date)
            .or_insert_with(|| DailyStats::empty(date))
            .add(u64::from(goal.weight()), is_completed(goal));
    }

    if unfinished > 0 {
        tracing::debug!("Left {} unfinished events out of daily scores", unfinished);
    }
    days
}

/// Weighted completion per local day of `scheduled_timestamp`.
///
/// Only events that have already ended count: an event ends `duration`
/// minutes after it is scheduled (60 when unset). Days without events are
/// omitted. Rows are in date order.
pub fn daily_scores<T: AsInstant>(ctx: &TimeContext, goals: &[Goal<T>]) -> Vec<DailyStats> {
    bucket_by_day(ctx, goals).into_values().collect()
}

/// One row for every local day of `year`, including empty days.
pub fn year_scores<T: AsInstant>(
    ctx: &TimeContext,
    goals: &[Goal<T>],
    year: i32,
) -> Vec<DailyStats> {
    let Some((start, end)) = ctx.year_bounds(year) else {
        return Vec::new();
    };
    let first = LocalDateTime::new(start, ctx.zone()).date();
    let last = LocalDateTime::new(end, ctx.zone()).date();

    let mut days = bucket_by_day(ctx, goals);
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| days.remove(&date).unwrap_or_else(|| DailyStats::empty(date)))
        .collect()
}
