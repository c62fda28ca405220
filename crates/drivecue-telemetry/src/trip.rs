//! Trip distance, duration and fuel use since the parking brake was released.

use serde::{Deserialize, Serialize};

use crate::TelemetrySnapshot;

/// Full-scale reading of the residual fuel channel.
const FUEL_SCALE_FULL: f64 = 255.0;
/// Tank capacity in litres.
const TANK_LITRES: f64 = 45.0;
const LITRES_PER_GALLON: f64 = 3.785;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct TripStart {
    odometer: f64,
    time_s: i64,
    residual_fuel: f64,
}

/// Totals since the trip started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// Odometer delta, in odometer units.
    pub distance: f64,
    pub elapsed_hours: f64,
    pub fuel_used_gallons: f64,
}

/// Starts a trip each time the parking brake goes from engaged to released.
#[derive(Debug, Clone, Default)]
pub struct TripTracker {
    parking_brake_was_on: bool,
    start: Option<TripStart>,
}

impl TripTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the latest snapshot. Returns true if this snapshot started a
    /// new trip.
    pub fn observe(&mut self, snapshot: &TelemetrySnapshot) -> bool {
        let released = self.parking_brake_was_on && !snapshot.parking_brake_on;
        if released {
            self.start = Some(TripStart {
                odometer: snapshot.odometer,
                time_s: snapshot.time_s,
                residual_fuel: snapshot.residual_fuel,
            });
        }
        self.parking_brake_was_on = snapshot.parking_brake_on;
        released
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Totals from the trip start to `current`, or `None` before any trip.
    pub fn summary(&self, current: &TelemetrySnapshot) -> Option<TripSummary> {
        let start = self.start?;
        let elapsed_s = current.time_s.saturating_sub(start.time_s);
        Some(TripSummary {
            distance: current.odometer - start.odometer,
            elapsed_hours: elapsed_s as f64 / 3600.0,
            fuel_used_gallons: (start.residual_fuel - current.residual_fuel) / FUEL_SCALE_FULL
                * TANK_LITRES
                / LITRES_PER_GALLON,
        })
    }
}
