//! Application wiring.
//!
//! [`TaskBoard`] builds the stores, hands every task writer the same
//! [`TaskWriteGate`] and exposes the services to transports.

use crate::attachment::services::{PhotoAttachmentError, PhotoAttachmentService};
use crate::config::AppConfig;
use crate::error::FailureKind;
use crate::photo::{
    adapters::filesystem::FilesystemPhotoStore,
    domain::{Photo, PhotoId},
    ports::PhotoStoreError,
    services::{PhotoLibraryError, PhotoLibraryService, UploadPhotoRequest},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{TaskLifecycleError, TaskLifecycleService, TaskWriteGate},
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Task service as wired by [`TaskBoard`].
pub type BoardTaskService<C> = TaskLifecycleService<InMemoryTaskRepository, C>;
/// Photo service as wired by [`TaskBoard`].
pub type BoardPhotoService<C> = PhotoLibraryService<FilesystemPhotoStore, C>;
/// Attachment service as wired by [`TaskBoard`].
pub type BoardAttachmentService =
    PhotoAttachmentService<InMemoryTaskRepository, FilesystemPhotoStore>;

/// Errors surfaced by [`TaskBoard`].
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Opening the photo store failed.
    #[error("failed to open photo store: {0}")]
    Storage(#[from] PhotoStoreError),
    /// A task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// A photo operation failed.
    #[error(transparent)]
    Photo(#[from] PhotoLibraryError),
    /// An attachment operation failed.
    #[error(transparent)]
    Attachment(#[from] PhotoAttachmentError),
    /// The target task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

impl TaskBoardError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Storage(err) => err.kind(),
            Self::Task(err) => err.kind(),
            Self::Photo(err) => err.kind(),
            Self::Attachment(err) => err.kind(),
            Self::TaskNotFound(_) => FailureKind::NotFound,
        }
    }
}

/// Result type for [`TaskBoard`] operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Fully wired task and photo services.
#[derive(Clone)]
pub struct TaskBoard<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    tasks: BoardTaskService<C>,
    photos: BoardPhotoService<C>,
    attachments: BoardAttachmentService,
}

impl TaskBoard<DefaultClock> {
    /// Opens the board using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Storage`] when the upload directory cannot
    /// be opened and [`TaskBoardError::Task`] when seeding fails.
    pub async fn open(config: &AppConfig) -> TaskBoardResult<Self> {
        Self::open_with_clock(config, Arc::new(DefaultClock)).await
    }
}

impl<C> TaskBoard<C>
where
    C: Clock + Send + Sync,
{
    /// Opens the board with an explicit clock, seeding the demonstration
    /// tasks when configured to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Storage`] when the upload directory cannot
    /// be opened and [`TaskBoardError::Task`] when seeding fails.
    pub async fn open_with_clock(config: &AppConfig, clock: Arc<C>) -> TaskBoardResult<Self> {
        let task_store = Arc::new(InMemoryTaskRepository::new());
        let photo_store = Arc::new(FilesystemPhotoStore::open(config.upload_dir.clone())?);
        let tasks = TaskLifecycleService::with_gate(
            Arc::clone(&task_store),
            Arc::clone(&clock),
            TaskWriteGate::new(),
        );
        let photos = PhotoLibraryService::new(Arc::clone(&photo_store), clock)
            .with_max_payload_bytes(config.max_photo_bytes);
        let attachments =
            PhotoAttachmentService::new(task_store, photo_store, tasks.gate().clone());

        if config.seed_tasks {
            tasks.seed_default_tasks().await?;
        }
        info!(
            upload_dir = %config.upload_dir,
            seeded = config.seed_tasks,
            "task board ready"
        );

        Ok(Self {
            tasks,
            photos,
            attachments,
        })
    }

    /// Returns the task service.
    ///
    /// Its removal operations are raw store removals that leave photo
    /// association entries behind; remove tasks through
    /// [`Self::remove_task`] or [`Self::remove_task_by_name`] instead.
    #[must_use]
    pub const fn tasks(&self) -> &BoardTaskService<C> {
        &self.tasks
    }

    /// Returns the photo service.
    #[must_use]
    pub const fn photos(&self) -> &BoardPhotoService<C> {
        &self.photos
    }

    /// Returns the attachment service.
    #[must_use]
    pub const fn attachments(&self) -> &BoardAttachmentService {
        &self.attachments
    }

    /// Uploads a photo and attaches it to an existing task.
    ///
    /// The photo is deleted again when attaching fails, so a failed call
    /// leaves no orphaned upload behind.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not exist,
    /// and the underlying service error when uploading or attaching fails.
    pub async fn upload_photo_to_task(
        &self,
        task_id: &TaskId,
        request: UploadPhotoRequest,
    ) -> TaskBoardResult<(Task, Photo)> {
        if self.tasks.get_task_by_id(task_id).await?.is_none() {
            return Err(TaskBoardError::TaskNotFound(task_id.clone()));
        }
        let photo = self.photos.upload_photo(request).await?;

        let attached = self.attachments.add_photo_to_task(task_id, photo.id()).await;
        match attached {
            Ok(Some(task)) => Ok((task, photo)),
            Ok(None) => {
                self.discard_upload(&photo).await;
                Err(TaskBoardError::TaskNotFound(task_id.clone()))
            }
            Err(err) => {
                self.discard_upload(&photo).await;
                Err(err.into())
            }
        }
    }

    /// Removes a task together with its association entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Attachment`] when a store write fails.
    pub async fn remove_task(&self, task_id: &TaskId) -> TaskBoardResult<bool> {
        Ok(self.attachments.remove_task(task_id).await?)
    }

    /// Removes the task whose name matches `name`, ignoring case, together
    /// with its association entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Attachment`] when a store write fails.
    pub async fn remove_task_by_name(&self, name: &str) -> TaskBoardResult<bool> {
        Ok(self.attachments.remove_task_by_name(name).await?)
    }

    /// Detaches a photo from every task and deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Attachment`] when a store write fails.
    pub async fn delete_photo(&self, photo_id: &PhotoId) -> TaskBoardResult<bool> {
        Ok(self.attachments.delete_photo(photo_id).await?)
    }

    async fn discard_upload(&self, photo: &Photo) {
        if let Err(err) = self.photos.delete_photo(photo.id()).await {
            warn!(photo_id = %photo.id(), error = %err, "failed to discard unattached upload");
        }
    }
}
