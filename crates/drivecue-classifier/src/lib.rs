//! Driving-state classification from recent telemetry.
//!
//! [`DrivingStateClassifier`] keeps a five-sample window per tracked channel,
//! fed once per poll from the client's [`TelemetrySnapshot`], and derives a
//! coarse [`DrivingState`] from priority-ordered thresholds on the speed,
//! brake and yaw-rate windows. [`StateTracker`] turns the resulting state
//! stream into transitions for presentation and media collaborators.
//!
//! ```
//! use drivecue_classifier::{DrivingState, DrivingStateClassifier};
//! use drivecue_telemetry::TelemetrySnapshot;
//!
//! let mut classifier = DrivingStateClassifier::new();
//! let mut snapshot = TelemetrySnapshot::new("usSF-413");
//! snapshot.speed = 60.0;
//!
//! for _ in 0..5 {
//!     classifier.update(&snapshot);
//! }
//! assert_eq!(classifier.state(), Some(DrivingState::Cruising));
//! ```
//!
//! [`TelemetrySnapshot`]: drivecue_telemetry::TelemetrySnapshot

#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod channel;
pub mod classifier;
pub mod state;
pub mod transitions;

pub use channel::Channel;
pub use classifier::{DrivingStateClassifier, classify};
pub use state::DrivingState;
pub use transitions::{StateTracker, StateTransition};
