//! Goal model - one record shape for goals, tasks, routines and events.

use serde::{Deserialize, Serialize};

use crate::instant::Instant;
use crate::local::LocalDateTime;
use crate::priority::Priority;
use crate::status::ResolutionStatus;

/// Goal as exchanged with the backend: temporal fields are epoch milliseconds.
pub type WireGoal = Goal<Instant>;

/// Goal as used by views: temporal fields are zone-aware local values.
pub type LocalGoal = Goal<LocalDateTime>;

/// Names of the temporal fields, in declaration order.
pub const TEMPORAL_FIELDS: [&str; 10] = [
    "start_timestamp",
    "end_timestamp",
    "next_timestamp",
    "scheduled_timestamp",
    "routine_time",
    "due_date",
    "start_date",
    "resolved_at",
    "updated_at",
    "gcal_last_sync",
];

/// Kind of goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    /// Long-lived guiding objective
    Directive,
    /// Container of tasks and achievements
    Project,
    /// Milestone
    Achievement,
    /// Recurring activity that generates events
    Routine,
    /// One-off unit of work
    #[default]
    Task,
    /// Scheduled occurrence of a task or routine
    Event,
}

impl GoalType {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Directive => "directive",
            GoalType::Project => "project",
            GoalType::Achievement => "achievement",
            GoalType::Routine => "routine",
            GoalType::Task => "task",
            GoalType::Event => "event",
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A goal record, generic over how its temporal fields are represented.
///
/// Every temporal field is optional. Absent fields are omitted on the wire
/// and stay absent through conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal<T> {
    /// Backend identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name
    pub name: String,

    /// Kind of goal
    pub goal_type: GoalType,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Priority label (`none`, `low`, `medium`, `high`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Persisted outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_status: Option<ResolutionStatus>,

    /// Duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,

    /// Window start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<T>,

    /// Window end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<T>,

    /// Next routine occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_timestamp: Option<T>,

    /// When an event is scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_timestamp: Option<T>,

    /// Time of day a routine fires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_time: Option<T>,

    /// Task due date (inclusive upper bound)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<T>,

    /// Task start date (earliest event)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<T>,

    /// When the goal was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<T>,

    /// Last modification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<T>,

    /// Last Google Calendar sync
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcal_last_sync: Option<T>,

    /// Routine recurrence rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    /// Routine category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_type: Option<String>,

    /// Network view position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,

    /// Network view position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,

    /// Parent task/routine of an event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,

    /// `task` or `routine`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,

    /// Routine occurrence key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_instance_id: Option<String>,

    /// Soft delete flag for routine events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,

    /// Google Calendar event ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcal_event_id: Option<String>,

    /// Google Calendar calendar ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcal_calendar_id: Option<String>,

    /// Whether the goal syncs to Google Calendar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcal_sync_enabled: Option<bool>,

    /// `bidirectional`, `to_gcal` or `from_gcal`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcal_sync_direction: Option<String>,

    /// Imported from Google Calendar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gcal_imported: Option<bool>,
}

impl<T> Default for Goal<T> {
    fn default() -> Self {
        Goal {
            id: None,
            name: String::new(),
            goal_type: GoalType::Task,
            description: None,
            user_id: None,
            priority: None,
            resolution_status: None,
            duration: None,
            start_timestamp: None,
            end_timestamp: None,
            next_timestamp: None,
            scheduled_timestamp: None,
            routine_time: None,
            due_date: None,
            start_date: None,
            resolved_at: None,
            updated_at: None,
            gcal_last_sync: None,
            frequency: None,
            routine_type: None,
            position_x: None,
            position_y: None,
            parent_id: None,
            parent_type: None,
            routine_instance_id: None,
            is_deleted: None,
            gcal_event_id: None,
            gcal_calendar_id: None,
            gcal_sync_enabled: None,
            gcal_sync_direction: None,
            is_gcal_imported: None,
        }
    }
}

impl<T> Goal<T> {
    /// Convert every temporal field with `f`, moving all other fields over.
    pub fn map_times<U>(self, mut f: impl FnMut(T) -> U) -> Goal<U> {
        Goal {
            start_timestamp: self.start_timestamp.map(&mut f),
            end_timestamp: self.end_timestamp.map(&mut f),
            next_timestamp: self.next_timestamp.map(&mut f),
            scheduled_timestamp: self.scheduled_timestamp.map(&mut f),
            routine_time: self.routine_time.map(&mut f),
            due_date: self.due_date.map(&mut f),
            start_date: self.start_date.map(&mut f),
            resolved_at: self.resolved_at.map(&mut f),
            updated_at: self.updated_at.map(&mut f),
            gcal_last_sync: self.gcal_last_sync.map(&mut f),
            id: self.id,
            name: self.name,
            goal_type: self.goal_type,
            description: self.description,
            user_id: self.user_id,
            priority: self.priority,
            resolution_status: self.resolution_status,
            duration: self.duration,
            frequency: self.frequency,
            routine_type: self.routine_type,
            position_x: self.position_x,
            position_y: self.position_y,
            parent_id: self.parent_id,
            parent_type: self.parent_type,
            routine_instance_id: self.routine_instance_id,
            is_deleted: self.is_deleted,
            gcal_event_id: self.gcal_event_id,
            gcal_calendar_id: self.gcal_calendar_id,
            gcal_sync_enabled: self.gcal_sync_enabled,
            gcal_sync_direction: self.gcal_sync_direction,
            is_gcal_imported: self.is_gcal_imported,
        }
    }

    /// Temporal fields paired with their names, in declaration order.
    pub fn temporal_fields(&self) -> [(&'static str, Option<&T>); 10] {
        [
            (TEMPORAL_FIELDS[0], self.start_timestamp.as_ref()),
            (TEMPORAL_FIELDS[1], self.end_timestamp.as_ref()),
            (TEMPORAL_FIELDS[2], self.next_timestamp.as_ref()),
            (TEMPORAL_FIELDS[3], self.scheduled_timestamp.as_ref()),
            (TEMPORAL_FIELDS[4], self.routine_time.as_ref()),
            (TEMPORAL_FIELDS[5], self.due_date.as_ref()),
            (TEMPORAL_FIELDS[6], self.start_date.as_ref()),
            (TEMPORAL_FIELDS[7], self.resolved_at.as_ref()),
            (TEMPORAL_FIELDS[8], self.updated_at.as_ref()),
            (TEMPORAL_FIELDS[9], self.gcal_last_sync.as_ref()),
        ]
    }

    /// Start of the goal's window: `start_timestamp`, else `start_date`.
    pub fn start_bound(&self) -> Option<&T> {
        self.start_timestamp.as_ref().or(self.start_date.as_ref())
    }

    /// End of the goal's window: `due_date`, else `end_timestamp`.
    pub fn end_bound(&self) -> Option<&T> {
        self.due_date.as_ref().or(self.end_timestamp.as_ref())
    }

    /// Resolution status, treating absent as pending.
    pub fn resolution(&self) -> ResolutionStatus {
        self.resolution_status.unwrap_or_default()
    }

    /// Completion weight from the priority label.
    pub fn weight(&self) -> u32 {
        Priority::weight_of(self.priority.as_deref())
    }
}
