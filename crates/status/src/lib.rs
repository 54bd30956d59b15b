//! Goal status and completion engine.
//!
//! Derives display statuses from resolution state and time bounds, and
//! aggregates priority-weighted completion for progress bars and
//! statistics views.

#![warn(missing_docs)]

pub mod display;
pub mod completion;
pub mod breakdown;
pub mod period;

pub use display::{compute_display_status, StatusEngine};
pub use completion::{weighted_completion, CompletionStats};
pub use breakdown::{
    daily_scores, duration_breakdown, priority_breakdown, source_breakdown, year_scores,
    DailyStats, DurationStats, PriorityStats, SourceBreakdown, SourceStats,
};
pub use period::{
    extended_stats, monthly_stats, smoothed_completion, weekly_stats, yearly_stats,
    ExtendedStats, PeriodStats, SmoothedPoint,
};
