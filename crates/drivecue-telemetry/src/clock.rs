//! Scenario clock display and preset jump targets.

use serde::{Deserialize, Serialize};

/// Format scenario seconds as `HH:MM:SS`. Hours are not wrapped; negative
/// times display as zero.
pub fn format_scenario_time(time_s: i64) -> String {
    let time_s = time_s.max(0);
    let hours = time_s / 3600;
    let minutes = (time_s / 60) % 60;
    let seconds = time_s % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Ordered scenario offsets (seconds) a presenter can jump straight to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioBookmarks(Vec<i64>);

impl ScenarioBookmarks {
    pub fn new(offsets: Vec<i64>) -> Self {
        Self(offsets)
    }

    /// Offset for bookmark `index`.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ScenarioBookmarks {
    fn default() -> Self {
        Self(vec![0, 470, 800, 1780, 1950, 2470, 2650])
    }
}
