//! Weighted completion aggregation.

use horizon_core::Goal;
use serde::{Deserialize, Serialize};

/// Counts and priority-weighted sums over a set of goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionStats {
    /// Number of goals
    pub total_count: usize,
    /// Number of goals with a non-pending resolution
    pub resolved_count: usize,
    /// Sum of priority weights over all goals
    pub weighted_total: u64,
    /// Sum of priority weights over resolved goals
    pub weighted_resolved: u64,
}

impl CompletionStats {
    /// Whether weights sum to zero and plain counts stand in for them.
    pub fn uses_count_fallback(&self) -> bool {
        self.weighted_total == 0
    }

    /// Denominator for the progress ratio.
    pub fn effective_total(&self) -> u64 {
        if self.uses_count_fallback() {
            self.total_count as u64
        } else {
            self.weighted_total
        }
    }

    /// Numerator for the progress ratio.
    pub fn effective_resolved(&self) -> u64 {
        if self.uses_count_fallback() {
            self.resolved_count as u64
        } else {
            self.weighted_resolved
        }
    }

    /// Progress in `[0, 1]`. Zero when there are no goals.
    pub fn ratio(&self) -> f64 {
        match self.effective_total() {
            0 => 0.0,
            total => self.effective_resolved() as f64 / total as f64,
        }
    }

    /// Progress in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Whether any goals were counted.
    pub fn has_data(&self) -> bool {
        self.total_count > 0
    }
}

/// Aggregate completion over `goals`, weighting each by its priority.
///
/// A goal counts as resolved when its resolution status is present and
/// not `pending`.
pub fn weighted_completion<T>(goals: &[Goal<T>]) -> CompletionStats {
    goals.iter().fold(CompletionStats::default(), |mut stats, goal| {
        let weight = u64::from(goal.weight());
        stats.total_count += 1;
        stats.weighted_total += weight;

        if goal.resolution_status.is_some_and(|status| status.is_resolved()) {
            stats.resolved_count += 1;
            stats.weighted_resolved += weight;
        }
        stats
    })
}
