//! Domain model for stored photos.

mod checksum;
mod error;
mod ids;
mod photo;

pub use checksum::PayloadChecksum;
pub use error::PhotoDomainError;
pub use ids::{ContentType, OriginalName, PhotoId, StoredFilename};
pub use photo::{PersistedPhotoData, Photo};
