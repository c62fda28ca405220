//! The driving states reported by the classifier.

use serde::{Deserialize, Serialize};

/// Coarse classification of current driving behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrivingState {
    /// Not enough history yet.
    Startup,
    /// Stationary with the brake held.
    Stopped,
    /// Steady speed on an open road.
    Cruising,
    /// Anything else.
    Active,
    /// Hard cornering at speed.
    Demanding,
}

impl DrivingState {
    pub fn as_str(self) -> &'static str {
        match self {
            DrivingState::Startup => "STARTUP",
            DrivingState::Stopped => "STOPPED",
            DrivingState::Cruising => "CRUISING",
            DrivingState::Active => "ACTIVE",
            DrivingState::Demanding => "DEMANDING",
        }
    }
}

impl std::fmt::Display for DrivingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
