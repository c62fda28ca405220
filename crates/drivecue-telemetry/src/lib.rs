//! Telemetry synchronization for a remote vehicle data source.
//!
//! [`TelemetryClient`] polls a [`TelemetrySource`] for one vehicle, maps the
//! source's wall-clock timestamps onto a seekable scenario clock
//! ([`TimeBase`]), smooths implausible position jumps ([`PositionEstimator`])
//! and publishes the result as a [`TelemetrySnapshot`].
//!
//! Failures never tear the snapshot down: transport errors, identity
//! mismatches and missing fields all degrade to "keep the last known value and
//! say what happened in `status`".
//!
//! ## Modules
//! - `client` - polling client and its critical section
//! - `time_base` - wall clock to scenario clock mapping
//! - `position` - per-axis jump rejection and extrapolation
//! - `fields` - typed field table produced by source adapters
//! - `snapshot` - published vehicle state
//! - `source` - the telemetry source seam
//! - `clock` - scenario time formatting and bookmarks
//! - `trip` - trip distance/time/fuel summary

#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod client;
pub mod clock;
pub mod error;
pub mod fields;
pub mod position;
pub mod snapshot;
pub mod source;
pub mod time_base;
pub mod trip;

pub use client::{PollOutcome, TelemetryClient};
pub use clock::{ScenarioBookmarks, format_scenario_time};
pub use error::TelemetryError;
pub use fields::{FieldTable, Parameter, VehicleRecord};
pub use position::{AxisVerdict, JUMP_THRESHOLD_DEG, PositionEstimate, PositionEstimator};
pub use snapshot::{GeoPoint, TelemetrySnapshot};
pub use source::TelemetrySource;
pub use time_base::TimeBase;
pub use trip::{TripSummary, TripTracker};

/// Status reported before the first poll completes.
pub const STATUS_STARTUP: &str = "Startup";
/// Status after a poll that found this client's vehicle.
pub const STATUS_RECEIVED: &str = "Vehicle data received";
/// Status after a poll whose response did not contain this client's vehicle.
pub const STATUS_NO_DATA: &str = "No vehicle data";
