//! Keeps task photo lists and the photo store association index in step.
//!
//! Attach, detach and photo deletion write the task first and the index
//! second; task removal drops the index entries first and the task last.
//! When a later write fails the earlier ones are undone, so callers never
//! observe a task that embeds a photo the index does not list (or the
//! reverse).

use crate::error::FailureKind;
use crate::photo::{
    domain::PhotoId,
    ports::{PhotoStore, PhotoStoreError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::TaskWriteGate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by attachment operations.
#[derive(Debug, Error)]
pub enum PhotoAttachmentError {
    /// Task store operation failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Photo store operation failed.
    #[error(transparent)]
    Photo(#[from] PhotoStoreError),
    /// No photo has the identifier.
    #[error("photo not found: {0}")]
    PhotoNotFound(PhotoId),
    /// A write failed and restoring the previous state failed as well.
    #[error("{cause}; restoring the previous state also failed: {rollback}")]
    RollbackFailed {
        /// Failure that triggered the rollback.
        cause: Box<PhotoAttachmentError>,
        /// Failure while restoring the previous state.
        rollback: Box<PhotoAttachmentError>,
    },
}

impl PhotoAttachmentError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Task(err) => err.kind(),
            Self::Photo(err) => err.kind(),
            Self::PhotoNotFound(_) => FailureKind::NotFound,
            Self::RollbackFailed { .. } => FailureKind::StorageFailure,
        }
    }
}

/// Result type for attachment operations.
pub type PhotoAttachmentResult<T> = Result<T, PhotoAttachmentError>;

/// Attaches photos to tasks and detaches them again.
///
/// Shares a [`TaskWriteGate`] with the task service so that attachment
/// read-modify-write sequences never interleave with task writes.
#[derive(Clone)]
pub struct PhotoAttachmentService<R, S>
where
    R: TaskRepository,
    S: PhotoStore,
{
    tasks: Arc<R>,
    photos: Arc<S>,
    gate: TaskWriteGate,
}

impl<R, S> PhotoAttachmentService<R, S>
where
    R: TaskRepository,
    S: PhotoStore,
{
    /// Creates an attachment service serialising on `gate`.
    #[must_use]
    pub const fn new(tasks: Arc<R>, photos: Arc<S>, gate: TaskWriteGate) -> Self {
        Self {
            tasks,
            photos,
            gate,
        }
    }

    /// Attaches a stored photo to a task.
    ///
    /// Returns `Ok(None)` when the task does not exist. Attaching a photo the
    /// task already carries leaves the list unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoAttachmentError::PhotoNotFound`] when the photo is not
    /// stored, and the underlying store error when a write fails. A failed
    /// index write is returned after the task has been restored.
    pub async fn add_photo_to_task(
        &self,
        task_id: &TaskId,
        photo_id: &PhotoId,
    ) -> PhotoAttachmentResult<Option<Task>> {
        let _guard = self.gate.acquire().await;
        let Some(original) = self.tasks.get_by_id(task_id).await? else {
            return Ok(None);
        };
        let photo = self
            .photos
            .get(photo_id)
            .await?
            .ok_or_else(|| PhotoAttachmentError::PhotoNotFound(photo_id.clone()))?;

        let mut task = original.clone();
        let changed = task.attach_photo(photo);
        if changed {
            self.tasks.update(&task).await?;
        }
        if let Err(cause) = self.photos.associate_with_task(photo_id, task_id).await {
            return Err(self.roll_back(changed, &original, cause).await);
        }

        info!(task_id = %task_id, photo_id = %photo_id, "photo attached to task");
        Ok(Some(task))
    }

    /// Detaches a photo from a task.
    ///
    /// Returns `Ok(None)` when the task does not exist. The photo itself
    /// stays in the store.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error when a write fails. A failed index
    /// write is returned after the task has been restored.
    pub async fn remove_photo_from_task(
        &self,
        task_id: &TaskId,
        photo_id: &PhotoId,
    ) -> PhotoAttachmentResult<Option<Task>> {
        let _guard = self.gate.acquire().await;
        let Some(original) = self.tasks.get_by_id(task_id).await? else {
            return Ok(None);
        };

        let mut task = original.clone();
        let changed = task.detach_photo(photo_id);
        if changed {
            self.tasks.update(&task).await?;
        }
        if let Err(cause) = self.photos.remove_from_task(photo_id, task_id).await {
            return Err(self.roll_back(changed, &original, cause).await);
        }

        info!(task_id = %task_id, photo_id = %photo_id, "photo detached from task");
        Ok(Some(task))
    }

    /// Detaches a photo from every task that lists it, then deletes it.
    ///
    /// Returns `false` when the photo was unknown; deleting twice is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error when a write fails. Every task
    /// already detached is restored before the error is returned.
    pub async fn delete_photo(&self, photo_id: &PhotoId) -> PhotoAttachmentResult<bool> {
        let _guard = self.gate.acquire().await;
        let mut originals = Vec::new();
        for task_id in self.photos.get_task_ids(photo_id).await? {
            match self.detach_stored(&task_id, photo_id).await {
                Ok(Some(original)) => originals.push(original),
                Ok(None) => {}
                Err(cause) => return Err(self.restore_tasks_after(cause, &originals).await),
            }
        }

        match self.photos.delete(photo_id).await {
            Ok(deleted) => {
                if deleted {
                    info!(
                        photo_id = %photo_id,
                        detached_from = originals.len(),
                        "photo deleted"
                    );
                }
                Ok(deleted)
            }
            Err(cause) => Err(self.restore_tasks_after(cause.into(), &originals).await),
        }
    }

    /// Removes a task and drops its association entries.
    ///
    /// Photos stay in the store. Returns `false` when the task was absent.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error when a write fails. Association
    /// entries already dropped are restored before the error is returned,
    /// and the task is left in place.
    pub async fn remove_task(&self, task_id: &TaskId) -> PhotoAttachmentResult<bool> {
        let _guard = self.gate.acquire().await;
        let Some(task) = self.tasks.get_by_id(task_id).await? else {
            return Ok(false);
        };
        self.remove_gated(&task).await
    }

    /// Removes the task whose name matches `name`, ignoring case, and drops
    /// its association entries.
    ///
    /// Returns `false` when no task matched.
    ///
    /// # Errors
    ///
    /// Same as [`Self::remove_task`].
    pub async fn remove_task_by_name(&self, name: &str) -> PhotoAttachmentResult<bool> {
        let _guard = self.gate.acquire().await;
        let Some(task) = self.tasks.get_by_name(name).await? else {
            return Ok(false);
        };
        self.remove_gated(&task).await
    }

    /// Drops the association entries of `task`, then the task itself.
    ///
    /// Callers hold the write gate.
    async fn remove_gated(&self, task: &Task) -> PhotoAttachmentResult<bool> {
        let task_id = task.id();
        let mut photo_ids: Vec<PhotoId> = task.photos().iter().map(|p| p.id().clone()).collect();
        for photo in self.photos.get_by_task_id(task_id).await? {
            if !photo_ids.contains(photo.id()) {
                photo_ids.push(photo.id().clone());
            }
        }

        let mut released = Vec::with_capacity(photo_ids.len());
        for photo_id in &photo_ids {
            if let Err(cause) = self.photos.remove_from_task(photo_id, task_id).await {
                return Err(self.reassociate_after(cause.into(), task_id, &released).await);
            }
            released.push(photo_id);
        }

        let removed = match self.tasks.remove(task_id).await {
            Ok(removed) => removed,
            Err(cause) => {
                return Err(self.reassociate_after(cause.into(), task_id, &released).await);
            }
        };
        if removed {
            info!(task_id = %task_id, released_photos = released.len(), "task removed");
        }
        Ok(removed)
    }

    /// Detaches a photo from one stored task.
    ///
    /// Returns the task as it was before the write, or `None` when the task
    /// is gone or did not embed the photo.
    async fn detach_stored(
        &self,
        task_id: &TaskId,
        photo_id: &PhotoId,
    ) -> PhotoAttachmentResult<Option<Task>> {
        let Some(original) = self.tasks.get_by_id(task_id).await? else {
            return Ok(None);
        };
        let mut task = original.clone();
        if !task.detach_photo(photo_id) {
            return Ok(None);
        }
        self.tasks.update(&task).await?;
        Ok(Some(original))
    }

    /// Restores `original` after an index write failed.
    async fn roll_back(
        &self,
        task_changed: bool,
        original: &Task,
        cause: PhotoStoreError,
    ) -> PhotoAttachmentError {
        if !task_changed {
            return cause.into();
        }
        self.restore_tasks_after(cause.into(), std::slice::from_ref(original))
            .await
    }

    /// Writes every task in `originals` back, then returns `cause`.
    ///
    /// All tasks are attempted even when one restore fails; the first
    /// restore failure is reported alongside `cause`.
    async fn restore_tasks_after(
        &self,
        cause: PhotoAttachmentError,
        originals: &[Task],
    ) -> PhotoAttachmentError {
        let mut restored: PhotoAttachmentResult<()> = Ok(());
        for original in originals {
            if let Err(err) = self.tasks.update(original).await
                && restored.is_ok()
            {
                restored = Err(err.into());
            }
        }
        settle(cause, restored, originals.len())
    }

    /// Re-associates `photo_ids` with `task_id`, then returns `cause`.
    async fn reassociate_after(
        &self,
        cause: PhotoAttachmentError,
        task_id: &TaskId,
        photo_ids: &[&PhotoId],
    ) -> PhotoAttachmentError {
        let mut restored: PhotoAttachmentResult<()> = Ok(());
        for photo_id in photo_ids {
            if let Err(err) = self.photos.associate_with_task(photo_id, task_id).await
                && restored.is_ok()
            {
                restored = Err(err.into());
            }
        }
        settle(cause, restored, photo_ids.len())
    }
}

/// Combines a write failure with the outcome of undoing it.
fn settle(
    cause: PhotoAttachmentError,
    restored: PhotoAttachmentResult<()>,
    undone: usize,
) -> PhotoAttachmentError {
    match restored {
        Ok(()) => {
            if undone > 0 {
                warn!(error = %cause, undone, "write failed, previous state restored");
            }
            cause
        }
        Err(rollback) => {
            warn!(error = %cause, rollback_error = %rollback, "write failed and restore failed");
            PhotoAttachmentError::RollbackFailed {
                cause: Box::new(cause),
                rollback: Box::new(rollback),
            }
        }
    }
}
