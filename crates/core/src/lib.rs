//! Horizon core data models.
//!
//! This crate defines the instants, zones, clocks and goal records that
//! the conversion and status crates operate on.

#![warn(missing_docs)]

// Time primitives
mod instant;
mod zone;
mod clock;
mod local;

// Goal records
mod goal;
mod status;
mod priority;

// Re-exports
pub use instant::{AsInstant, Instant};
pub use zone::{Zone, ZoneError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use local::LocalDateTime;

pub use goal::{Goal, GoalType, LocalGoal, WireGoal, TEMPORAL_FIELDS};
pub use status::{DisplayStatus, ResolutionStatus};
pub use priority::{Priority, DEFAULT_WEIGHT};
