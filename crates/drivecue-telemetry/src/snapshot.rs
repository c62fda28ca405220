//! Published vehicle state.

use serde::{Deserialize, Serialize};

use crate::{FieldTable, STATUS_STARTUP};

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Latest known state of the tracked vehicle.
///
/// Replaced wholesale after every successful poll. Numeric fields the source
/// omitted keep their previous value rather than dropping to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Identifier the client polls for.
    pub vehicle_id: String,
    /// Hardware vehicle identifier, once reported.
    pub vid: Option<String>,
    /// Scenario time in seconds.
    pub time_s: i64,
    /// Estimated (extrapolated when needed) position.
    pub position: GeoPoint,
    pub speed: f64,
    pub lateral_acceleration: f64,
    pub longitudinal_acceleration: f64,
    pub yaw_rate: f64,
    pub odometer: f64,
    /// 0-100.
    pub accelerator_pedal_ratio: f64,
    pub brake_on: bool,
    pub parking_brake_on: bool,
    pub steering_angle: f64,
    pub engine_rpm: f64,
    /// 0-255 scale.
    pub residual_fuel: f64,
    pub engine_temperature: f64,
    pub outside_temperature: f64,
    /// Outcome of the last poll, for display.
    pub status: String,
}

impl TelemetrySnapshot {
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vid: None,
            time_s: 0,
            position: GeoPoint::default(),
            speed: 0.0,
            lateral_acceleration: 0.0,
            longitudinal_acceleration: 0.0,
            yaw_rate: 0.0,
            odometer: 0.0,
            accelerator_pedal_ratio: 0.0,
            brake_on: false,
            parking_brake_on: false,
            steering_angle: 0.0,
            engine_rpm: 0.0,
            residual_fuel: 0.0,
            engine_temperature: 0.0,
            outside_temperature: 0.0,
            status: STATUS_STARTUP.to_string(),
        }
    }

    /// Overwrite every scalar channel present in `fields`, keeping the
    /// previous value for the ones that are not. Position is left alone; it
    /// goes through the position estimator instead.
    pub fn merge_fields(&mut self, fields: &FieldTable) {
        fn keep(target: &mut f64, value: Option<f64>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        keep(&mut self.speed, fields.speed);
        keep(&mut self.lateral_acceleration, fields.lateral_acceleration);
        keep(
            &mut self.longitudinal_acceleration,
            fields.longitudinal_acceleration,
        );
        keep(&mut self.yaw_rate, fields.yaw_rate);
        keep(&mut self.odometer, fields.odometer);
        keep(
            &mut self.accelerator_pedal_ratio,
            fields.accelerator_pedal_ratio,
        );
        keep(&mut self.steering_angle, fields.steering_angle);
        keep(&mut self.engine_rpm, fields.engine_rpm);
        keep(&mut self.residual_fuel, fields.residual_fuel);
        keep(&mut self.engine_temperature, fields.engine_temperature);
        keep(&mut self.outside_temperature, fields.outside_temperature);

        if let Some(brake_on) = fields.brake_on {
            self.brake_on = brake_on;
        }
        if let Some(parking_brake_on) = fields.parking_brake_on {
            self.parking_brake_on = parking_brake_on;
        }
    }
}
