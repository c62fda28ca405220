//! Error types for drivecuectl

use drivecue_telemetry::TelemetryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Bookmark {index} not found ({available} configured)")]
    BookmarkNotFound { index: usize, available: usize },

    #[error("Telemetry source unavailable: {0}")]
    SourceUnavailable(TelemetryError),

    #[error("Telemetry request failed: {0}")]
    Telemetry(TelemetryError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl From<TelemetryError> for CliError {
    fn from(err: TelemetryError) -> Self {
        if err.is_transport() {
            CliError::SourceUnavailable(err)
        } else {
            CliError::Telemetry(err)
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::BookmarkNotFound { .. } => 3,
            CliError::InvalidConfiguration(_) | CliError::YamlError(_) => 4,
            CliError::SourceUnavailable(_) => 5,
            CliError::Telemetry(_) => 6,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}
