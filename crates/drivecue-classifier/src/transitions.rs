//! Turning the per-cycle state into change events.

use serde::{Deserialize, Serialize};

use crate::DrivingState;

/// A change of driving state between two consecutive cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: DrivingState,
    pub to: DrivingState,
}

impl StateTransition {
    /// Whether this transition enters `state` from somewhere else.
    pub fn entered(&self, state: DrivingState) -> bool {
        self.to == state && self.from != state
    }

    pub fn left(&self, state: DrivingState) -> bool {
        self.from == state && self.to != state
    }
}

/// Remembers the last observed state. Starts out in `Startup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTracker {
    previous: DrivingState,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            previous: DrivingState::Startup,
        }
    }

    /// Record `state`, returning the transition if it differs from the last
    /// one observed.
    pub fn observe(&mut self, state: DrivingState) -> Option<StateTransition> {
        let previous = std::mem::replace(&mut self.previous, state);
        (previous != state).then_some(StateTransition {
            from: previous,
            to: state,
        })
    }

    pub fn previous(&self) -> DrivingState {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = DrivingState::Startup;
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}
