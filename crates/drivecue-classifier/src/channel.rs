//! Measurement channels tracked by the classifier.

use drivecue_telemetry::TelemetrySnapshot;
use serde::{Deserialize, Serialize};

/// A snapshot value tracked in its own sample window.
///
/// Only speed, brake and yaw rate feed the thresholds today; the others are
/// tracked so their statistics stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    AcceleratorPedal,
    /// Brake light as 1.0 (on) / 0.0 (off).
    Brake,
    LateralAcceleration,
    LongitudinalAcceleration,
    Speed,
    /// Absolute yaw rate.
    YawRate,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::AcceleratorPedal,
        Channel::Brake,
        Channel::LateralAcceleration,
        Channel::LongitudinalAcceleration,
        Channel::Speed,
        Channel::YawRate,
    ];

    /// The sample this channel takes from a snapshot.
    pub fn sample(self, snapshot: &TelemetrySnapshot) -> f64 {
        match self {
            Channel::AcceleratorPedal => snapshot.accelerator_pedal_ratio,
            Channel::Brake => {
                if snapshot.brake_on {
                    1.0
                } else {
                    0.0
                }
            }
            Channel::LateralAcceleration => snapshot.lateral_acceleration,
            Channel::LongitudinalAcceleration => snapshot.longitudinal_acceleration,
            Channel::Speed => snapshot.speed,
            Channel::YawRate => snapshot.yaw_rate.abs(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::AcceleratorPedal => "accelerator_pedal",
            Channel::Brake => "brake",
            Channel::LateralAcceleration => "lateral_acceleration",
            Channel::LongitudinalAcceleration => "longitudinal_acceleration",
            Channel::Speed => "speed",
            Channel::YawRate => "yaw_rate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brake_and_yaw_are_mapped() {
        let mut snapshot = TelemetrySnapshot::new("usSF-413");
        snapshot.brake_on = true;
        snapshot.yaw_rate = -7.5;
        assert!((Channel::Brake.sample(&snapshot) - 1.0).abs() < f64::EPSILON);
        assert!((Channel::YawRate.sample(&snapshot) - 7.5).abs() < f64::EPSILON);

        snapshot.brake_on = false;
        assert!(Channel::Brake.sample(&snapshot).abs() < f64::EPSILON);
    }
}
