//! Display status derivation.

use std::collections::HashMap;

use horizon_core::{AsInstant, Clock, DisplayStatus, Goal, Instant, ResolutionStatus, SystemClock};

/// Derive the display status of a goal at `now`.
///
/// Completed goals are `tardy` when resolved strictly after their end
/// bound. Pending goals are `upcoming` strictly before their start bound,
/// `late` strictly after their end bound, and `active` otherwise, so an
/// instant exactly on a bound counts as on time.
pub fn compute_display_status<T: AsInstant>(goal: &Goal<T>, now: Instant) -> DisplayStatus {
    let end = goal.end_bound().map(AsInstant::as_instant);

    match goal.resolution() {
        ResolutionStatus::Completed => {
            let resolved = goal.resolved_at.as_ref().map(AsInstant::as_instant);
            match (resolved, end) {
                (Some(resolved), Some(end)) if resolved > end => DisplayStatus::Tardy,
                _ => DisplayStatus::Completed,
            }
        }
        ResolutionStatus::Failed => DisplayStatus::Failed,
        ResolutionStatus::Skipped => DisplayStatus::Skipped,
        ResolutionStatus::Pending => {
            let start = goal.start_bound().map(AsInstant::as_instant);
            if start.is_some_and(|start| now < start) {
                DisplayStatus::Upcoming
            } else if end.is_some_and(|end| now > end) {
                DisplayStatus::Late
            } else {
                DisplayStatus::Active
            }
        }
    }
}

/// Derives display statuses against an injected clock.
#[derive(Debug, Clone, Default)]
pub struct StatusEngine<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> StatusEngine<C> {
    /// Create an engine reading "now" from `clock`.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Display status of one goal.
    pub fn status<T: AsInstant>(&self, goal: &Goal<T>) -> DisplayStatus {
        compute_display_status(goal, self.clock.now())
    }

    /// Display status of each goal, in order. All goals are judged against
    /// the same instant.
    pub fn statuses<T: AsInstant>(&self, goals: &[Goal<T>]) -> Vec<DisplayStatus> {
        let now = self.clock.now();
        goals.iter().map(|goal| compute_display_status(goal, now)).collect()
    }

    /// How many goals fall in each display status.
    pub fn counts<T: AsInstant>(&self, goals: &[Goal<T>]) -> HashMap<DisplayStatus, usize> {
        let mut counts = HashMap::new();
        for status in self.statuses(goals) {
            *counts.entry(status).or_insert(0) += 1;
        }
        counts
    }
}
