//! Goal priorities and their completion weights.

use serde::{Deserialize, Serialize};

/// Weight used when a priority is missing or unrecognized.
pub const DEFAULT_WEIGHT: u32 = 2;

/// Goal priority.
///
/// On the wire the priority is a free-form string; this enum covers the
/// recognized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Weight 0
    None,
    /// Weight 1
    Low,
    /// Weight 2
    Medium,
    /// Weight 3
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 4] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
    ];

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Completion weight.
    pub fn weight(&self) -> u32 {
        match self {
            Priority::None => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Parse a wire value. Unrecognized strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Weight of an optional wire priority string.
    pub fn weight_of(priority: Option<&str>) -> u32 {
        priority
            .and_then(Priority::parse)
            .map(|p| p.weight())
            .unwrap_or(DEFAULT_WEIGHT)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
