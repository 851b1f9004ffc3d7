//! Task aggregate root and its unpersisted draft.

use super::{Priority, TaskId, TaskIdSlot, TaskName};
use crate::photo::domain::{Photo, PhotoId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task that has not been stored yet.
///
/// The creation timestamp is stamped when the draft is built; the identifier
/// stays open until [`TaskDraft::assign_id`] or store insertion resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    id: TaskIdSlot,
    name: TaskName,
    description: String,
    priority: Priority,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        name: TaskName,
        description: impl Into<String>,
        priority: Priority,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskIdSlot::Unassigned,
            name,
            description: description.into(),
            priority,
            created_at: clock.utc(),
        }
    }

    /// Uses a caller-supplied identifier instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = TaskIdSlot::Assigned(id);
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the identifier slot.
    #[must_use]
    pub const fn id(&self) -> &TaskIdSlot {
        &self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Resolves the identifier slot, generating an identifier when none was
    /// supplied.
    #[must_use]
    pub fn assign_id(self) -> Self {
        let id = self.id.resolve();
        Self {
            id: TaskIdSlot::Assigned(id),
            ..self
        }
    }

    /// Converts the draft into a stored task with no photos.
    #[must_use]
    pub fn into_task(self) -> Task {
        Task {
            id: self.id.resolve(),
            name: self.name,
            description: self.description,
            priority: self.priority,
            photos: Vec::new(),
            created_at: self.created_at,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    name: TaskName,
    description: String,
    priority: Priority,
    photos: Vec<Photo>,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the attached photos in attachment order.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the creation timestamp as milliseconds since the Unix epoch.
    #[must_use]
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// Returns `true` when a photo with `photo_id` is attached.
    #[must_use]
    pub fn has_photo(&self, photo_id: &PhotoId) -> bool {
        self.photos.iter().any(|photo| photo.id() == photo_id)
    }

    /// Replaces the task name.
    pub fn rename(&mut self, name: TaskName) {
        self.name = name;
    }

    /// Replaces the task description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the task priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Appends a photo unless one with the same identifier is attached.
    ///
    /// Returns `true` when the photo list changed.
    pub(crate) fn attach_photo(&mut self, photo: Photo) -> bool {
        if self.has_photo(photo.id()) {
            return false;
        }
        self.photos.push(photo);
        true
    }

    /// Removes the photo with `photo_id`.
    ///
    /// Returns `true` when the photo list changed.
    pub(crate) fn detach_photo(&mut self, photo_id: &PhotoId) -> bool {
        let before = self.photos.len();
        self.photos.retain(|photo| photo.id() != photo_id);
        self.photos.len() != before
    }
}
