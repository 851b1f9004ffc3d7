//! Shared fixtures for task board integration tests.

use camino::Utf8PathBuf;
use rstest::fixture;
use taskboard::app::TaskBoard;
use taskboard::config::AppConfig;
use taskboard::photo::services::UploadPhotoRequest;
use tempfile::TempDir;

/// Temporary upload directory together with a configuration pointing at it.
pub struct BoardEnv {
    pub temp: TempDir,
    pub config: AppConfig,
}

impl BoardEnv {
    /// Returns the directory photo payloads are written to.
    pub fn upload_dir(&self) -> &Utf8PathBuf {
        &self.config.upload_dir
    }

    /// Opens a board over this environment.
    pub async fn open(&self) -> TaskBoard {
        TaskBoard::open(&self.config)
            .await
            .expect("task board should open")
    }
}

/// Provides a configuration whose upload directory lives in a fresh temp dir.
#[fixture]
pub fn env() -> BoardEnv {
    let temp = tempfile::tempdir().expect("temp dir");
    let upload_dir = Utf8PathBuf::from_path_buf(temp.path().join("uploads").join("photos"))
        .expect("utf-8 temp path");
    let config = AppConfig {
        upload_dir,
        ..AppConfig::default()
    };
    BoardEnv { temp, config }
}

/// Builds a JPEG upload request.
pub fn jpeg(name: &str, data: &[u8]) -> UploadPhotoRequest {
    UploadPhotoRequest::new(name, "image/jpeg", data)
}
