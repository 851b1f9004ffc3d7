//! Task priority levels.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority of a task, from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    Medium,
    /// Should be handled soon.
    High,
    /// Must be handled first.
    Vital,
}

impl Priority {
    /// All priorities in ascending urgency.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Vital];

    /// Returns the canonical representation used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Vital => "Vital",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "vital" => Ok(Self::Vital),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
