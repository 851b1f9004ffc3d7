//! Environment-driven configuration.
//!
//! | Variable                    | Default          |
//! |-----------------------------|------------------|
//! | `TASKBOARD_UPLOAD_DIR`      | `uploads/photos` |
//! | `TASKBOARD_SEED_TASKS`      | `true`           |
//! | `TASKBOARD_MAX_PHOTO_BYTES` | `10485760`       |
//! | `TASKBOARD_LOG`             | `info`           |
//! | `TASKBOARD_LOG_JSON`        | `false`          |

use crate::photo::services::DEFAULT_MAX_PAYLOAD_BYTES;
use crate::telemetry::{DEFAULT_FILTER, TelemetryConfig};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Directory photos are written to unless configured otherwise.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads/photos";

const UPLOAD_DIR: &str = "TASKBOARD_UPLOAD_DIR";
const SEED_TASKS: &str = "TASKBOARD_SEED_TASKS";
const MAX_PHOTO_BYTES: &str = "TASKBOARD_MAX_PHOTO_BYTES";
const LOG: &str = "TASKBOARD_LOG";
const LOG_JSON: &str = "TASKBOARD_LOG_JSON";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that does not parse.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// What was expected instead.
        reason: &'static str,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory photo payloads are written to; created on startup.
    pub upload_dir: Utf8PathBuf,
    /// Insert the demonstration tasks on startup.
    pub seed_tasks: bool,
    /// Largest accepted photo payload in bytes.
    pub max_photo_bytes: u64,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: Utf8PathBuf::from(DEFAULT_UPLOAD_DIR),
            seed_tasks: true,
            max_photo_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let upload_dir = non_empty(lookup(UPLOAD_DIR))
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_UPLOAD_DIR), Utf8PathBuf::from);
        let seed_tasks = match non_empty(lookup(SEED_TASKS)) {
            Some(raw) => parse_bool(SEED_TASKS, raw)?,
            None => true,
        };
        let max_photo_bytes = match non_empty(lookup(MAX_PHOTO_BYTES)) {
            Some(raw) => parse_bytes(MAX_PHOTO_BYTES, raw)?,
            None => DEFAULT_MAX_PAYLOAD_BYTES,
        };
        let filter = non_empty(lookup(LOG)).unwrap_or_else(|| DEFAULT_FILTER.to_owned());
        let json = match non_empty(lookup(LOG_JSON)) {
            Some(raw) => parse_bool(LOG_JSON, raw)?,
            None => false,
        };

        Ok(Self {
            upload_dir,
            seed_tasks,
            max_photo_bytes,
            telemetry: TelemetryConfig { filter, json },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_bool(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected true/false, yes/no, on/off or 1/0",
        }),
    }
}

fn parse_bytes(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(bytes) if bytes > 0 => Ok(bytes),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a positive number of bytes",
        }),
    }
}
