//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task record.
///
/// Identifiers are opaque strings: callers may supply their own, and the
/// store generates a UUID v4 string when none is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a new random task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier slot of a task that has not been stored yet.
///
/// The slot is resolved exactly once, when the task is created; a stored
/// [`super::Task`] always carries a concrete [`TaskId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskIdSlot {
    /// No identifier was supplied; one is generated on resolution.
    #[default]
    Unassigned,
    /// The caller supplied an identifier.
    Assigned(TaskId),
}

impl TaskIdSlot {
    /// Returns the assigned identifier, if any.
    #[must_use]
    pub const fn assigned(&self) -> Option<&TaskId> {
        match self {
            Self::Unassigned => None,
            Self::Assigned(id) => Some(id),
        }
    }

    /// Resolves the slot into a concrete identifier.
    #[must_use]
    pub fn resolve(self) -> TaskId {
        match self {
            Self::Unassigned => TaskId::generate(),
            Self::Assigned(id) => id,
        }
    }
}

impl From<Option<TaskId>> for TaskIdSlot {
    fn from(value: Option<TaskId>) -> Self {
        value.map_or(Self::Unassigned, Self::Assigned)
    }
}

/// Human-readable task name.
///
/// Names are unique across tasks when compared case-insensitively. The
/// original casing is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `other` equals this name ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        names_match(&self.0, other)
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unicode-aware case-insensitive comparison.
fn names_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
