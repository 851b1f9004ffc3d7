//! Photo store backed by a directory on the local filesystem.
//!
//! Payloads are written verbatim under their generated filename. Metadata and
//! the task association index are held in memory and lost on restart.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use super::run_blocking;
use crate::photo::{
    domain::{Photo, PhotoId, StoredFilename},
    ports::{PhotoStore, PhotoStoreError, PhotoStoreResult},
};
use crate::task::domain::TaskId;

/// Photo store writing payloads into one upload directory.
#[derive(Debug, Clone)]
pub struct FilesystemPhotoStore {
    root: Arc<Dir>,
    upload_dir: Utf8PathBuf,
    state: Arc<RwLock<PhotoIndexState>>,
}

#[derive(Debug, Default)]
struct PhotoIndexState {
    photos: HashMap<PhotoId, Photo>,
    /// Identifiers and filenames claimed by saves whose payload is still
    /// being written.
    reserved: HashMap<PhotoId, StoredFilename>,
    task_photos: HashMap<TaskId, Vec<PhotoId>>,
    photo_tasks: HashMap<PhotoId, Vec<TaskId>>,
}

impl PhotoIndexState {
    fn filename_in_use(&self, filename: &StoredFilename) -> bool {
        self.photos.values().any(|photo| photo.filename() == filename)
            || self.reserved.values().any(|claimed| claimed == filename)
    }

    fn associate(&mut self, photo_id: &PhotoId, task_id: &TaskId) {
        let photos = self.task_photos.entry(task_id.clone()).or_default();
        if !photos.contains(photo_id) {
            photos.push(photo_id.clone());
        }
        let tasks = self.photo_tasks.entry(photo_id.clone()).or_default();
        if !tasks.contains(task_id) {
            tasks.push(task_id.clone());
        }
    }

    fn dissociate(&mut self, photo_id: &PhotoId, task_id: &TaskId) {
        remove_from_index(&mut self.task_photos, task_id, photo_id);
        remove_from_index(&mut self.photo_tasks, photo_id, task_id);
    }

    /// Drops the metadata and every association of a photo.
    fn forget(&mut self, photo_id: &PhotoId) -> Option<Photo> {
        let task_ids = self.photo_tasks.remove(photo_id).unwrap_or_default();
        for task_id in &task_ids {
            remove_from_index(&mut self.task_photos, task_id, photo_id);
        }
        self.photos.remove(photo_id)
    }
}

/// Removes `value` from the list under `key`, dropping the entry once empty.
fn remove_from_index<K, V>(index: &mut HashMap<K, Vec<V>>, key: &K, value: &V)
where
    K: std::hash::Hash + Eq,
    V: PartialEq,
{
    if let Some(values) = index.get_mut(key) {
        values.retain(|existing| existing != value);
        if values.is_empty() {
            index.remove(key);
        }
    }
}

/// Claim on a photo identifier and its filename for the duration of a save.
///
/// Dropping the claim releases the identifier, so an abandoned save leaves
/// nothing behind in the index.
struct Reservation {
    state: Arc<RwLock<PhotoIndexState>>,
    photo_id: PhotoId,
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.write() {
            state.reserved.remove(&self.photo_id);
        }
    }
}

impl FilesystemPhotoStore {
    /// Opens the store, creating `upload_dir` and its parents if absent.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(upload_dir: impl Into<Utf8PathBuf>) -> PhotoStoreResult<Self> {
        let upload_dir = upload_dir.into();
        Dir::create_ambient_dir_all(&upload_dir, ambient_authority())?;
        let root = Dir::open_ambient_dir(&upload_dir, ambient_authority())?;
        info!(upload_dir = %upload_dir, "photo store opened");
        Ok(Self {
            root: Arc::new(root),
            upload_dir,
            state: Arc::new(RwLock::new(PhotoIndexState::default())),
        })
    }

    /// Returns the directory payloads are written to.
    #[must_use]
    pub fn upload_dir(&self) -> &Utf8Path {
        &self.upload_dir
    }

    fn read_state(&self) -> PhotoStoreResult<RwLockReadGuard<'_, PhotoIndexState>> {
        self.state
            .read()
            .map_err(|err| PhotoStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> PhotoStoreResult<RwLockWriteGuard<'_, PhotoIndexState>> {
        self.state
            .write()
            .map_err(|err| PhotoStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn reserve(&self, photo: &Photo) -> PhotoStoreResult<Reservation> {
        let mut state = self.write_state()?;
        let photo_id = photo.id();
        if state.photos.contains_key(photo_id) || state.reserved.contains_key(photo_id) {
            return Err(PhotoStoreError::DuplicatePhoto(photo_id.clone()));
        }
        if state.filename_in_use(photo.filename()) {
            return Err(PhotoStoreError::FilenameInUse {
                photo_id: photo_id.clone(),
                filename: photo.filename().clone(),
            });
        }
        state
            .reserved
            .insert(photo_id.clone(), photo.filename().clone());
        Ok(Reservation {
            state: Arc::clone(&self.state),
            photo_id: photo_id.clone(),
        })
    }
}

/// Writes `data` to a hidden staging file and renames it into place.
///
/// The staging file is removed again when any step fails.
fn write_atomically(dir: &Dir, filename: &str, data: &[u8]) -> std::io::Result<()> {
    let staging = format!(".{filename}.partial");
    let result = stage_and_rename(dir, &staging, filename, data);
    if result.is_err()
        && let Err(err) = dir.remove_file(&staging)
        && err.kind() != ErrorKind::NotFound
    {
        warn!(staging = %staging, error = %err, "failed to discard staging file");
    }
    result
}

fn stage_and_rename(dir: &Dir, staging: &str, filename: &str, data: &[u8]) -> std::io::Result<()> {
    let mut file = dir.create(staging)?;
    file.write_all(data)?;
    file.sync_all()?;
    dir.rename(staging, dir, filename)
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn save(&self, photo: &Photo, data: &[u8]) -> PhotoStoreResult<PhotoId> {
        if !photo.size_matches(data) {
            return Err(PhotoStoreError::SizeMismatch {
                photo_id: photo.id().clone(),
                declared: photo.size(),
                actual: u64::try_from(data.len()).unwrap_or(u64::MAX),
            });
        }

        let reservation = self.reserve(photo)?;
        let root = Arc::clone(&self.root);
        let filename = photo.filename().as_str().to_owned();
        let payload = data.to_vec();
        run_blocking(move || Ok(write_atomically(&root, &filename, &payload)?)).await?;

        {
            let mut state = self.write_state()?;
            state.photos.insert(photo.id().clone(), photo.clone());
        }
        drop(reservation);
        info!(
            photo_id = %photo.id(),
            filename = %photo.filename(),
            size = photo.size(),
            "photo stored"
        );
        Ok(photo.id().clone())
    }

    async fn get(&self, id: &PhotoId) -> PhotoStoreResult<Option<Photo>> {
        let state = self.read_state()?;
        Ok(state.photos.get(id).cloned())
    }

    async fn get_data(&self, id: &PhotoId) -> PhotoStoreResult<Option<Vec<u8>>> {
        let Some(photo) = self.get(id).await? else {
            return Ok(None);
        };

        let root = Arc::clone(&self.root);
        let filename = photo.filename().as_str().to_owned();
        let missing_id = id.clone();
        let data = run_blocking(move || match root.read(&filename) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(PhotoStoreError::PayloadMissing(missing_id))
            }
            Err(err) => Err(err.into()),
        })
        .await?;

        if !photo.verify(&data) {
            warn!(photo_id = %id, "photo payload failed verification");
            return Err(PhotoStoreError::Corrupted(id.clone()));
        }
        Ok(Some(data))
    }

    async fn delete(&self, id: &PhotoId) -> PhotoStoreResult<bool> {
        let Some(photo) = self.get(id).await? else {
            return Ok(false);
        };

        let root = Arc::clone(&self.root);
        let filename = photo.filename().as_str().to_owned();
        let payload_found = run_blocking(move || match root.remove_file(&filename) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        })
        .await?;
        if !payload_found {
            warn!(photo_id = %id, filename = %photo.filename(), "photo payload already absent");
        }

        let removed = self.write_state()?.forget(id).is_some();
        if removed {
            info!(photo_id = %id, "photo deleted");
        }
        Ok(removed)
    }

    async fn get_by_task_id(&self, task_id: &TaskId) -> PhotoStoreResult<Vec<Photo>> {
        let state = self.read_state()?;
        Ok(state
            .task_photos
            .get(task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.photos.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_all(&self) -> PhotoStoreResult<Vec<Photo>> {
        let state = self.read_state()?;
        Ok(state.photos.values().cloned().collect())
    }

    async fn get_task_ids(&self, id: &PhotoId) -> PhotoStoreResult<Vec<TaskId>> {
        let state = self.read_state()?;
        Ok(state.photo_tasks.get(id).cloned().unwrap_or_default())
    }

    async fn associate_with_task(&self, id: &PhotoId, task_id: &TaskId) -> PhotoStoreResult<()> {
        self.write_state()?.associate(id, task_id);
        debug!(photo_id = %id, task_id = %task_id, "photo associated with task");
        Ok(())
    }

    async fn remove_from_task(&self, id: &PhotoId, task_id: &TaskId) -> PhotoStoreResult<()> {
        self.write_state()?.dissociate(id, task_id);
        debug!(photo_id = %id, task_id = %task_id, "photo removed from task");
        Ok(())
    }
}
