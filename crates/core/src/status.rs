//! Resolution and display status enumerations.

use serde::{Deserialize, Serialize};

/// Persisted outcome of a goal or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Not yet resolved
    #[default]
    Pending,
    /// Done
    Completed,
    /// Attempted and missed
    Failed,
    /// Deliberately not done
    Skipped,
}

impl ResolutionStatus {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Pending => "pending",
            ResolutionStatus::Completed => "completed",
            ResolutionStatus::Failed => "failed",
            ResolutionStatus::Skipped => "skipped",
        }
    }

    /// Whether this counts as resolved (anything but pending).
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ResolutionStatus::Pending)
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResolutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResolutionStatus::Pending),
            "completed" => Ok(ResolutionStatus::Completed),
            "failed" => Ok(ResolutionStatus::Failed),
            "skipped" => Ok(ResolutionStatus::Skipped),
            other => Err(format!("unknown resolution status: {}", other)),
        }
    }
}

/// Derived status shown in the UI. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Pending, start still in the future
    Upcoming,
    /// Pending and within its window
    Active,
    /// Pending past its end
    Late,
    /// Completed on time
    Completed,
    /// Completed after its end
    Tardy,
    /// Skipped
    Skipped,
    /// Failed
    Failed,
}

impl DisplayStatus {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Upcoming => "upcoming",
            DisplayStatus::Active => "active",
            DisplayStatus::Late => "late",
            DisplayStatus::Completed => "completed",
            DisplayStatus::Tardy => "tardy",
            DisplayStatus::Skipped => "skipped",
            DisplayStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
