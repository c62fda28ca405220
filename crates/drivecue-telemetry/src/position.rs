//! Per-axis rejection of implausible position jumps.
//!
//! Each poll delivers one raw fix. For latitude and longitude independently,
//! a move of more than [`JUMP_THRESHOLD_DEG`] from the previous *raw* fix is
//! treated as a bad reading: that axis is extrapolated from the last estimate
//! using the last accepted per-axis delta. The raw fix is always remembered,
//! so the next delta is measured along the true raw trajectory.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Largest per-poll move accepted on one axis, in degrees (about 111 m of
/// latitude).
pub const JUMP_THRESHOLD_DEG: f64 = 0.001;

/// What happened to one axis of a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisVerdict {
    Accepted,
    Extrapolated,
}

impl AxisVerdict {
    pub fn is_extrapolated(self) -> bool {
        matches!(self, AxisVerdict::Extrapolated)
    }
}

/// Result of running one raw fix through the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionEstimate {
    pub position: GeoPoint,
    pub latitude: AxisVerdict,
    pub longitude: AxisVerdict,
}

impl PositionEstimate {
    pub fn is_extrapolated(&self) -> bool {
        self.latitude.is_extrapolated() || self.longitude.is_extrapolated()
    }

    /// Status note describing the extrapolated axes, if any.
    pub fn extrapolation_note(&self) -> Option<&'static str> {
        match (
            self.latitude.is_extrapolated(),
            self.longitude.is_extrapolated(),
        ) {
            (true, true) => Some("Extrapolating latitude and longitude"),
            (true, false) => Some("Extrapolating latitude"),
            (false, true) => Some("Extrapolating longitude"),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Axis {
    last_raw: f64,
    last_accepted_delta: f64,
    estimated: f64,
}

impl Axis {
    fn step(&mut self, raw: f64, seeded: bool) -> AxisVerdict {
        let verdict = if !seeded {
            self.last_accepted_delta = 0.0;
            self.estimated = raw;
            AxisVerdict::Accepted
        } else {
            let delta = raw - self.last_raw;
            if delta.abs() > JUMP_THRESHOLD_DEG {
                self.estimated += self.last_accepted_delta;
                AxisVerdict::Extrapolated
            } else {
                self.last_accepted_delta = delta;
                self.estimated = raw;
                AxisVerdict::Accepted
            }
        };
        self.last_raw = raw;
        verdict
    }
}

/// Tracks the raw and estimated trajectories separately.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionEstimator {
    latitude: Axis,
    longitude: Axis,
    seeded: bool,
}

impl PositionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw fix and get the position to publish.
    ///
    /// The very first fix has nothing to compare against and is accepted as
    /// is, with a zero extrapolation rate.
    pub fn estimate(&mut self, raw: GeoPoint) -> PositionEstimate {
        let seeded = self.seeded;
        let latitude = self.latitude.step(raw.latitude, seeded);
        let longitude = self.longitude.step(raw.longitude, seeded);
        self.seeded = true;

        PositionEstimate {
            position: self.estimated(),
            latitude,
            longitude,
        }
    }

    /// Last published position (origin before the first fix).
    pub fn estimated(&self) -> GeoPoint {
        GeoPoint::new(self.latitude.estimated, self.longitude.estimated)
    }

    /// Last raw fix, if any has been seen.
    pub fn last_raw(&self) -> Option<GeoPoint> {
        self.seeded
            .then(|| GeoPoint::new(self.latitude.last_raw, self.longitude.last_raw))
    }

    /// Per-axis rate used for extrapolation, as (latitude, longitude) degrees.
    pub fn last_accepted_delta(&self) -> GeoPoint {
        GeoPoint::new(
            self.latitude.last_accepted_delta,
            self.longitude.last_accepted_delta,
        )
    }
}
