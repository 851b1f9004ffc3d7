//! Store port for photo payloads, metadata and task associations.

use crate::error::FailureKind;
use crate::photo::domain::{Photo, PhotoId, StoredFilename};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for photo store operations.
pub type PhotoStoreResult<T> = Result<T, PhotoStoreError>;

/// Photo persistence contract.
///
/// Besides payloads and metadata the store owns the association index
/// between tasks and photos, readable from either side. Association calls
/// do not check that the task or photo exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Writes the payload and records its metadata.
    ///
    /// Metadata becomes visible only after the payload is fully written.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoStoreError::SizeMismatch`] when `data` does not match
    /// the recorded size, [`PhotoStoreError::DuplicatePhoto`] when the
    /// identifier is taken, [`PhotoStoreError::FilenameInUse`] when another
    /// photo owns the filename, and [`PhotoStoreError::Io`] when the write
    /// fails.
    async fn save(&self, photo: &Photo, data: &[u8]) -> PhotoStoreResult<PhotoId>;

    /// Returns the metadata of a photo.
    async fn get(&self, id: &PhotoId) -> PhotoStoreResult<Option<Photo>>;

    /// Reads the payload of a photo.
    ///
    /// Returns `None` when no photo has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoStoreError::PayloadMissing`] when metadata exists but
    /// the payload file is gone, and [`PhotoStoreError::Corrupted`] when the
    /// payload no longer matches its size or checksum.
    async fn get_data(&self, id: &PhotoId) -> PhotoStoreResult<Option<Vec<u8>>>;

    /// Deletes the payload, the metadata and every association of a photo.
    ///
    /// A payload file that is already absent is not an error. Returns
    /// `false` when the photo was unknown.
    async fn delete(&self, id: &PhotoId) -> PhotoStoreResult<bool>;

    /// Returns the photos associated with a task, in association order.
    ///
    /// Identifiers without metadata are skipped.
    async fn get_by_task_id(&self, task_id: &TaskId) -> PhotoStoreResult<Vec<Photo>>;

    /// Returns the metadata of every stored photo, in no particular order.
    async fn get_all(&self) -> PhotoStoreResult<Vec<Photo>>;

    /// Returns the tasks a photo is associated with, in association order.
    async fn get_task_ids(&self, id: &PhotoId) -> PhotoStoreResult<Vec<TaskId>>;

    /// Associates a photo with a task. Re-associating is a no-op.
    async fn associate_with_task(&self, id: &PhotoId, task_id: &TaskId) -> PhotoStoreResult<()>;

    /// Removes the association between a photo and a task, if present.
    async fn remove_from_task(&self, id: &PhotoId, task_id: &TaskId) -> PhotoStoreResult<()>;
}

/// Errors returned by photo store implementations.
#[derive(Debug, Clone, Error)]
pub enum PhotoStoreError {
    /// The payload length differs from the recorded size.
    #[error("photo {photo_id} declares {declared} bytes but the payload has {actual}")]
    SizeMismatch {
        /// Photo being stored.
        photo_id: PhotoId,
        /// Size recorded in the metadata.
        declared: u64,
        /// Actual payload length.
        actual: u64,
    },

    /// A photo with the same identifier already exists.
    #[error("duplicate photo identifier: {0}")]
    DuplicatePhoto(PhotoId),

    /// Another photo already stores its payload under the same filename.
    #[error("photo {photo_id} cannot use filename {filename}, which is already in use")]
    FilenameInUse {
        /// Photo being stored.
        photo_id: PhotoId,
        /// Filename claimed by another photo.
        filename: StoredFilename,
    },

    /// Metadata exists but the payload file is gone.
    #[error("payload for photo {0} is missing")]
    PayloadMissing(PhotoId),

    /// The payload no longer matches its recorded size or checksum.
    #[error("payload for photo {0} failed verification")]
    Corrupted(PhotoId),

    /// Filesystem failure.
    #[error("photo storage I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// Persistence-layer failure other than file I/O.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PhotoStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::SizeMismatch { .. } => FailureKind::InvalidInput,
            Self::DuplicatePhoto(_) | Self::FilenameInUse { .. } => FailureKind::Conflict,
            Self::PayloadMissing(_) => FailureKind::NotFound,
            Self::Corrupted(_) | Self::Io(_) | Self::Persistence(_) => FailureKind::StorageFailure,
        }
    }
}

impl From<std::io::Error> for PhotoStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
