//! In-memory task repository.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::task::{
    domain::{PageRequest, PagedResult, Priority, Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in a single vector in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
}

impl InMemoryTaskState {
    fn position_by_id(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.name().matches(name))
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Sorts newest first; the sort is stable so equal timestamps keep
/// insertion order.
fn newest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|task| Reverse(task.created_at()));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.tasks.clone())
    }

    async fn get_paged(&self, request: PageRequest) -> TaskRepositoryResult<PagedResult<Task>> {
        let all = self.read()?.tasks.clone();
        Ok(request.paginate(newest_first(all)))
    }

    async fn get_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.priority() == priority)
            .cloned()
            .collect())
    }

    async fn get_by_priority_paged(
        &self,
        priority: Priority,
        request: PageRequest,
    ) -> TaskRepositoryResult<PagedResult<Task>> {
        let filtered = self.get_by_priority(priority).await?;
        Ok(request.paginate(newest_first(filtered)))
    }

    async fn get_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .position_by_id(id)
            .and_then(|index| state.tasks.get(index))
            .cloned())
    }

    async fn get_by_name(&self, name: &str) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .position_by_name(name)
            .and_then(|index| state.tasks.get(index))
            .cloned())
    }

    async fn add(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let task = draft.into_task();
        let mut state = self.write()?;
        if state.position_by_id(task.id()).is_some() {
            return Err(TaskRepositoryError::DuplicateTask(task.id().clone()));
        }
        state.tasks.push(task.clone());
        debug!(task_id = %task.id(), task_name = %task.name(), "task stored");
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let slot = state
            .position_by_id(task.id())
            .and_then(|index| state.tasks.get_mut(index))
            .ok_or_else(|| TaskRepositoryError::NotFound(task.id().clone()))?;
        *slot = task.clone();
        debug!(task_id = %task.id(), "task replaced");
        Ok(task.clone())
    }

    async fn remove(&self, id: &TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(index) = state.position_by_id(id) else {
            return Ok(false);
        };
        state.tasks.remove(index);
        debug!(task_id = %id, "task removed");
        Ok(true)
    }

    async fn remove_by_name(&self, name: &str) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let Some(index) = state.position_by_name(name) else {
            return Ok(false);
        };
        let removed = state.tasks.remove(index);
        debug!(task_id = %removed.id(), task_name = %removed.name(), "task removed by name");
        Ok(true)
    }
}
