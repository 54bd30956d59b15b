//! Human-readable display strings.

use horizon_core::LocalDateTime;

/// Which parts of a value to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayKind {
    /// `Sun, Jan 15, 2023`
    Date,
    /// `10:30 AM`
    Time,
    /// `Sun, Jan 15, 2023, 10:30 AM`
    #[default]
    DateTime,
}

impl std::str::FromStr for DisplayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(DisplayKind::Date),
            "time" => Ok(DisplayKind::Time),
            "datetime" => Ok(DisplayKind::DateTime),
            other => Err(format!("unknown display kind: {}", other)),
        }
    }
}

/// Format a value for read-only display (en-US).
///
/// Pinned to UTC calendar fields, not the value's zone: every viewer of
/// the same instant sees the same label. Input controls, by contrast, use
/// local fields (see [`crate::format_for_input`]). Returns an empty string
/// for `None`.
pub fn format_for_display(value: Option<&LocalDateTime>, kind: DisplayKind) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let pattern = match kind {
        DisplayKind::Date => "%a, %b %-d, %Y",
        DisplayKind::Time => "%-I:%M %p",
        DisplayKind::DateTime => "%a, %b %-d, %Y, %-I:%M %p",
    };
    value.utc().format(pattern).to_string()
}
