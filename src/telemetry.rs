//! Structured logging setup.
//!
//! Library code only emits `tracing` events; binaries and tests decide
//! whether to install a subscriber through [`init`].

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Boxed error returned by subscriber installation.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Filter applied when neither `RUST_LOG` nor configuration names one.
pub const DEFAULT_FILTER: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `tracing` filter directive, such as `info` or `taskboard=debug`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
            json: false,
        }
    }
}

/// Errors returned while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive does not parse.
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        /// Offending directive.
        filter: String,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[source] BoxError),
}

/// Parses a filter directive.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the directive is malformed.
pub fn build_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter).map_err(|source| TelemetryError::InvalidFilter {
        filter: filter.to_owned(),
        source,
    })
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the configured filter is
/// malformed and [`TelemetryError::Install`] when a subscriber is already
/// installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.filter)?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.json {
        subscriber.json().try_init().map_err(TelemetryError::Install)
    } else {
        subscriber.try_init().map_err(TelemetryError::Install)
    }
}
