//! Telemetry error taxonomy.

use thiserror::Error;

/// Failures talking to the telemetry source.
///
/// None of these are fatal: the client records them in the snapshot status
/// and keeps the last good values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to reach telemetry source: {0}")]
    Transport(String),

    #[error("Telemetry request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Malformed telemetry response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Telemetry source rejected {command}: {reason}")]
    CommandRejected { command: String, reason: String },
}

impl TelemetryError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        TelemetryError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether the source could not be reached at all, as opposed to
    /// answering with something unusable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TelemetryError::Transport(_) | TelemetryError::Timeout { .. }
        )
    }
}
