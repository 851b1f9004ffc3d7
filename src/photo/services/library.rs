//! Service layer for photo upload, retrieval and deletion.

use crate::error::FailureKind;
use crate::photo::{
    domain::{ContentType, OriginalName, Photo, PhotoDomainError, PhotoId},
    ports::{PhotoStore, PhotoStoreError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Largest payload accepted unless configured otherwise (10 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Request payload for uploading a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPhotoRequest {
    original_name: String,
    content_type: String,
    data: Vec<u8>,
}

impl UploadPhotoRequest {
    /// Creates an upload request.
    #[must_use]
    pub fn new(
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Photo metadata together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDownload {
    /// Stored metadata, including the original name for disposition.
    pub photo: Photo,
    /// Verified payload bytes.
    pub data: Vec<u8>,
}

/// Service-level errors for photo operations.
#[derive(Debug, Error)]
pub enum PhotoLibraryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PhotoDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] PhotoStoreError),
    /// The payload exceeds the configured limit.
    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Payload length in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
    /// No photo has the identifier.
    #[error("photo not found: {0}")]
    NotFound(PhotoId),
}

impl PhotoLibraryError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::PayloadTooLarge { .. } => FailureKind::InvalidInput,
            Self::NotFound(_) => FailureKind::NotFound,
        }
    }
}

/// Result type for photo library service operations.
pub type PhotoLibraryResult<T> = Result<T, PhotoLibraryError>;

/// Photo orchestration service.
#[derive(Clone)]
pub struct PhotoLibraryService<S, C>
where
    S: PhotoStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    max_payload_bytes: u64,
}

impl<S, C> PhotoLibraryService<S, C>
where
    S: PhotoStore,
    C: Clock + Send + Sync,
{
    /// Creates a photo service with the default payload limit.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    /// Overrides the largest accepted payload.
    #[must_use]
    pub const fn with_max_payload_bytes(mut self, limit: u64) -> Self {
        self.max_payload_bytes = limit;
        self
    }

    /// Returns the largest accepted payload in bytes.
    #[must_use]
    pub const fn max_payload_bytes(&self) -> u64 {
        self.max_payload_bytes
    }

    /// Stores a new photo and returns its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Domain`] for an empty name or malformed
    /// content type, [`PhotoLibraryError::PayloadTooLarge`] above the limit
    /// and [`PhotoLibraryError::Store`] when the write fails.
    pub async fn upload_photo(&self, request: UploadPhotoRequest) -> PhotoLibraryResult<Photo> {
        let original_name = OriginalName::new(request.original_name)?;
        let content_type = ContentType::new(request.content_type)?;
        let size = u64::try_from(request.data.len()).unwrap_or(u64::MAX);
        if size > self.max_payload_bytes {
            return Err(PhotoLibraryError::PayloadTooLarge {
                size,
                limit: self.max_payload_bytes,
            });
        }

        let photo = Photo::from_upload(original_name, content_type, &request.data, &*self.clock);
        self.store.save(&photo, &request.data).await?;
        info!(
            photo_id = %photo.id(),
            original_name = %photo.original_name(),
            content_type = %photo.content_type(),
            "photo uploaded"
        );
        Ok(photo)
    }

    /// Retrieves photo metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Store`] when the store fails.
    pub async fn get_photo(&self, id: &PhotoId) -> PhotoLibraryResult<Option<Photo>> {
        Ok(self.store.get(id).await?)
    }

    /// Retrieves a photo payload.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Store`] when the payload is missing,
    /// corrupted or unreadable.
    pub async fn get_photo_data(&self, id: &PhotoId) -> PhotoLibraryResult<Option<Vec<u8>>> {
        Ok(self.store.get_data(id).await?)
    }

    /// Retrieves metadata and payload together.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::NotFound`] when no photo has the
    /// identifier, and [`PhotoStoreError::PayloadMissing`] (wrapped) when the
    /// metadata exists but the payload is gone.
    pub async fn download_photo(&self, id: &PhotoId) -> PhotoLibraryResult<PhotoDownload> {
        let photo = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PhotoLibraryError::NotFound(id.clone()))?;
        let data = self
            .store
            .get_data(id)
            .await?
            .ok_or_else(|| PhotoLibraryError::NotFound(id.clone()))?;
        Ok(PhotoDownload { photo, data })
    }

    /// Deletes a photo from the store.
    ///
    /// Tasks that embed the photo keep their copy; use
    /// [`crate::attachment::services::PhotoAttachmentService::delete_photo`]
    /// to detach it first.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Store`] when the store fails.
    pub async fn delete_photo(&self, id: &PhotoId) -> PhotoLibraryResult<bool> {
        Ok(self.store.delete(id).await?)
    }

    /// Returns the metadata of every stored photo.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Store`] when the store fails.
    pub async fn get_all_photos(&self) -> PhotoLibraryResult<Vec<Photo>> {
        Ok(self.store.get_all().await?)
    }

    /// Returns the photos associated with a task, in association order.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoLibraryError::Store`] when the store fails.
    pub async fn get_photos_by_task_id(&self, task_id: &TaskId) -> PhotoLibraryResult<Vec<Photo>> {
        Ok(self.store.get_by_task_id(task_id).await?)
    }
}
