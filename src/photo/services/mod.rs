//! Application services for photo orchestration.

mod library;

pub use library::{
    DEFAULT_MAX_PAYLOAD_BYTES, PhotoDownload, PhotoLibraryError, PhotoLibraryResult,
    PhotoLibraryService, UploadPhotoRequest,
};
