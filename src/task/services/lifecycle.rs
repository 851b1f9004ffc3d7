//! Service layer for task creation, update, lookup and removal.

use super::TaskWriteGate;
use crate::error::FailureKind;
use crate::task::{
    domain::{
        PageRequest, PagedResult, Priority, Task, TaskDomainError, TaskDraft, TaskId, TaskName,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    id: Option<String>,
    name: String,
    description: String,
    priority: Priority,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            priority,
        }
    }

    /// Uses a caller-supplied task identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for replacing the editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    name: String,
    description: String,
    priority: Priority,
}

impl UpdateTaskRequest {
    /// Creates an update for the task with `id`.
    #[must_use]
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            priority,
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Another task already uses the name, ignoring case.
    #[error("a task named '{0}' already exists")]
    DuplicateName(TaskName),
}

impl TaskLifecycleError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::DuplicateName(_) => FailureKind::Conflict,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Demonstration task inserted by [`TaskLifecycleService::seed_default_tasks`].
struct SeedTask {
    name: &'static str,
    description: &'static str,
    priority: Priority,
    age_hours: i64,
}

const SEED_TASKS: [SeedTask; 4] = [
    SeedTask {
        name: "cleaning",
        description: "Clean the house",
        priority: Priority::Low,
        age_hours: 24,
    },
    SeedTask {
        name: "gardening",
        description: "Mow the lawn",
        priority: Priority::Medium,
        age_hours: 12,
    },
    SeedTask {
        name: "shopping",
        description: "Buy the groceries",
        priority: Priority::High,
        age_hours: 6,
    },
    SeedTask {
        name: "painting",
        description: "Paint the fence",
        priority: Priority::Medium,
        age_hours: 3,
    },
];

/// Task orchestration service.
///
/// Creation holds the [`TaskWriteGate`] across the name check and the insert,
/// so two concurrent creations cannot both succeed with one name.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    gate: TaskWriteGate,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with its own write gate.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_gate(repository, clock, TaskWriteGate::new())
    }

    /// Creates a service sharing `gate` with other task writers.
    #[must_use]
    pub const fn with_gate(repository: Arc<R>, clock: Arc<C>, gate: TaskWriteGate) -> Self {
        Self {
            repository,
            clock,
            gate,
        }
    }

    /// Returns the write gate this service serialises on.
    #[must_use]
    pub const fn gate(&self) -> &TaskWriteGate {
        &self.gate
    }

    /// Creates a task after checking that no other task uses its name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an empty name or identifier,
    /// [`TaskLifecycleError::DuplicateName`] when the name is taken, and
    /// [`TaskLifecycleError::Repository`] when the store rejects the insert.
    pub async fn add_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let name = TaskName::new(request.name)?;
        let mut draft = TaskDraft::new(name, request.description, request.priority, &*self.clock);
        if let Some(raw_id) = request.id {
            draft = draft.with_id(TaskId::new(raw_id)?);
        }
        self.insert_unique(draft).await
    }

    /// Replaces the name, description and priority of a stored task.
    ///
    /// The identifier, creation timestamp and photo list are kept from the
    /// stored record. The new name is not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let name = TaskName::new(request.name)?;
        let _guard = self.gate.acquire().await;
        let mut task = self
            .repository
            .get_by_id(&request.id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(request.id.clone()))?;
        task.rename(name);
        task.set_description(request.description);
        task.set_priority(request.priority);
        let updated = self.repository.update(&task).await?;
        debug!(task_id = %updated.id(), "task updated");
        Ok(updated)
    }

    /// Returns every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_all_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.get_all().await?)
    }

    /// Returns one page of tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_tasks_paged(
        &self,
        request: PageRequest,
    ) -> TaskLifecycleResult<PagedResult<Task>> {
        Ok(self.repository.get_paged(request).await?)
    }

    /// Returns tasks with the given priority in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_tasks_by_priority(
        &self,
        priority: Priority,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.get_by_priority(priority).await?)
    }

    /// Returns one page of tasks with the given priority, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_tasks_by_priority_paged(
        &self,
        priority: Priority,
        request: PageRequest,
    ) -> TaskLifecycleResult<PagedResult<Task>> {
        Ok(self
            .repository
            .get_by_priority_paged(priority, request)
            .await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_task_by_id(&self, id: &TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Retrieves a task by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn get_task_by_name(&self, name: &str) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.get_by_name(name).await?)
    }

    /// Removes a task by identifier. Returns `false` when it was absent.
    ///
    /// Photo association entries are left untouched; use
    /// [`crate::attachment::services::PhotoAttachmentService::remove_task`]
    /// to drop them as well.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn remove_task(&self, id: &TaskId) -> TaskLifecycleResult<bool> {
        let _guard = self.gate.acquire().await;
        let removed = self.repository.remove(id).await?;
        if removed {
            info!(task_id = %id, "task removed");
        }
        Ok(removed)
    }

    /// Removes the task whose name matches `name`, ignoring case.
    ///
    /// This is a raw store removal like [`Self::remove_task`]: association
    /// entries in the photo store are left behind. Use
    /// [`crate::attachment::services::PhotoAttachmentService::remove_task_by_name`]
    /// whenever photos may be attached.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn remove_task_by_name(&self, name: &str) -> TaskLifecycleResult<bool> {
        let _guard = self.gate.acquire().await;
        let removed = self.repository.remove_by_name(name).await?;
        if removed {
            info!(task_name = name, "task removed by name");
        }
        Ok(removed)
    }

    /// Inserts the four demonstration tasks, backdated relative to now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::DuplicateName`] when a seed name is
    /// already taken.
    pub async fn seed_default_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let now = self.clock.utc();
        let mut seeded = Vec::with_capacity(SEED_TASKS.len());
        for seed in &SEED_TASKS {
            let draft = TaskDraft::new(
                TaskName::new(seed.name)?,
                seed.description,
                seed.priority,
                &*self.clock,
            )
            .with_created_at(hours_before(now, seed.age_hours));
            seeded.push(self.insert_unique(draft).await?);
        }
        info!(count = seeded.len(), "seeded default tasks");
        Ok(seeded)
    }

    async fn insert_unique(&self, draft: TaskDraft) -> TaskLifecycleResult<Task> {
        let _guard = self.gate.acquire().await;
        if self
            .repository
            .get_by_name(draft.name().as_str())
            .await?
            .is_some()
        {
            return Err(TaskLifecycleError::DuplicateName(draft.name().clone()));
        }
        let task = self.repository.add(draft).await?;
        info!(task_id = %task.id(), task_name = %task.name(), "task created");
        Ok(task)
    }
}

fn hours_before(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    now.checked_sub_signed(TimeDelta::hours(hours))
        .unwrap_or(now)
}
