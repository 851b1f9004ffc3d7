//! Filesystem adapters for photo storage.

mod store;

pub use store::FilesystemPhotoStore;

use crate::photo::ports::{PhotoStoreError, PhotoStoreResult};

/// Runs blocking file I/O on the blocking thread pool.
async fn run_blocking<F, T>(f: F) -> PhotoStoreResult<T>
where
    F: FnOnce() -> PhotoStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(PhotoStoreError::persistence)?
}
