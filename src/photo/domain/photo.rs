//! Photo metadata record.

use super::{ContentType, OriginalName, PayloadChecksum, PhotoId, StoredFilename};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Metadata describing one stored photo payload.
///
/// The payload itself lives in the photo store; `size` and `checksum`
/// describe it so reads can detect truncation or corruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    id: PhotoId,
    filename: StoredFilename,
    original_name: OriginalName,
    content_type: ContentType,
    size: u64,
    checksum: PayloadChecksum,
    uploaded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a photo from stored metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPhotoData {
    /// Stored photo identifier.
    pub id: PhotoId,
    /// Stored payload filename.
    pub filename: StoredFilename,
    /// Name supplied by the uploader.
    pub original_name: OriginalName,
    /// Payload MIME type.
    pub content_type: ContentType,
    /// Payload length in bytes.
    pub size: u64,
    /// Payload SHA-256 digest.
    pub checksum: PayloadChecksum,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    /// Describes a freshly uploaded payload.
    ///
    /// A new identifier and storage filename are generated; size and checksum
    /// are taken from `data`.
    #[must_use]
    pub fn from_upload(
        original_name: OriginalName,
        content_type: ContentType,
        data: &[u8],
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PhotoId::generate(),
            filename: StoredFilename::generate(&original_name),
            original_name,
            content_type,
            size: u64::try_from(data.len()).unwrap_or(u64::MAX),
            checksum: PayloadChecksum::compute(data),
            uploaded_at: clock.utc(),
        }
    }

    /// Reconstructs a photo from stored metadata.
    #[must_use]
    pub fn from_persisted(data: PersistedPhotoData) -> Self {
        Self {
            id: data.id,
            filename: data.filename,
            original_name: data.original_name,
            content_type: data.content_type,
            size: data.size,
            checksum: data.checksum,
            uploaded_at: data.uploaded_at,
        }
    }

    /// Returns the photo identifier.
    #[must_use]
    pub const fn id(&self) -> &PhotoId {
        &self.id
    }

    /// Returns the payload filename inside the upload directory.
    #[must_use]
    pub const fn filename(&self) -> &StoredFilename {
        &self.filename
    }

    /// Returns the uploader-supplied name.
    #[must_use]
    pub const fn original_name(&self) -> &OriginalName {
        &self.original_name
    }

    /// Returns the payload MIME type.
    #[must_use]
    pub const fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the payload checksum.
    #[must_use]
    pub const fn checksum(&self) -> &PayloadChecksum {
        &self.checksum
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    /// Returns the upload timestamp as milliseconds since the Unix epoch.
    #[must_use]
    pub fn uploaded_at_millis(&self) -> i64 {
        self.uploaded_at.timestamp_millis()
    }

    /// Returns `true` when `data` has the recorded length.
    #[must_use]
    pub fn size_matches(&self, data: &[u8]) -> bool {
        u64::try_from(data.len()).is_ok_and(|len| len == self.size)
    }

    /// Returns `true` when `data` has the recorded length and checksum.
    #[must_use]
    pub fn verify(&self, data: &[u8]) -> bool {
        self.size_matches(data) && self.checksum.matches(data)
    }
}
