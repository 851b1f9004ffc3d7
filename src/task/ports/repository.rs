//! Repository port for task persistence, lookup and listing.

use crate::error::FailureKind;
use crate::task::domain::{PageRequest, PagedResult, Priority, Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing operations without a page request return tasks in insertion
/// order. Paged operations sort by creation timestamp, newest first, keeping
/// insertion order between tasks created at the same instant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task in insertion order.
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of all tasks, newest first.
    async fn get_paged(&self, request: PageRequest) -> TaskRepositoryResult<PagedResult<Task>>;

    /// Returns tasks with exactly the given priority, in insertion order.
    async fn get_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of tasks with the given priority, newest first.
    ///
    /// Totals are computed over the filtered set.
    async fn get_by_priority_paged(
        &self,
        priority: Priority,
        request: PageRequest,
    ) -> TaskRepositoryResult<PagedResult<Task>>;

    /// Finds a task by identifier.
    async fn get_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task whose name equals `name` ignoring case.
    async fn get_by_name(&self, name: &str) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a new task, resolving its identifier slot.
    ///
    /// Name uniqueness is not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when a task with the
    /// resolved identifier already exists.
    async fn add(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Replaces the stored task with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Removes a task by identifier. Returns `false` when it was absent.
    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<bool>;

    /// Removes the task whose name equals `name` ignoring case.
    ///
    /// Returns `false` when no task matched.
    async fn remove_by_name(&self, name: &str) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::DuplicateTask(_) => FailureKind::Conflict,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Persistence(_) => FailureKind::StorageFailure,
        }
    }
}
