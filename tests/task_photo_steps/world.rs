//! Shared world state for task photo attachment scenarios.

use camino::Utf8PathBuf;
use rstest::fixture;
use taskboard::app::TaskBoard;
use taskboard::config::AppConfig;
use taskboard::photo::{
    domain::Photo,
    services::{PhotoDownload, PhotoLibraryError},
};
use taskboard::task::{
    domain::{PagedResult, Task},
    services::TaskLifecycleError,
};
use tempfile::TempDir;

/// Scenario world for task photo behaviour tests.
pub struct TaskPhotoWorld {
    pub temp: TempDir,
    pub config: AppConfig,
    pub board: Option<TaskBoard>,
    pub last_photo: Option<Photo>,
    pub last_page: Option<PagedResult<Task>>,
    pub last_create_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_download: Option<Result<PhotoDownload, PhotoLibraryError>>,
}

impl TaskPhotoWorld {
    /// Creates a world with a fresh upload directory and no board yet.
    #[must_use]
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("temp dir");
        let upload_dir =
            Utf8PathBuf::from_path_buf(temp.path().join("photos")).expect("utf-8 temp path");
        Self {
            temp,
            config: AppConfig {
                upload_dir,
                ..AppConfig::default()
            },
            board: None,
            last_photo: None,
            last_page: None,
            last_create_result: None,
            last_download: None,
        }
    }

    /// Returns the opened board.
    pub fn board(&self) -> Result<&TaskBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("task board has not been opened in scenario world"))
    }

    /// Returns the most recently uploaded photo.
    pub fn photo(&self) -> Result<&Photo, eyre::Report> {
        self.last_photo
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing uploaded photo in scenario world"))
    }

    /// Looks up a task by name on the opened board.
    pub fn task_named(&self, name: &str) -> Result<Task, eyre::Report> {
        run_async(self.board()?.tasks().get_task_by_name(name))
            .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?
            .ok_or_else(|| eyre::eyre!("no task named {name}"))
    }
}

impl Default for TaskPhotoWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskPhotoWorld {
    TaskPhotoWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
