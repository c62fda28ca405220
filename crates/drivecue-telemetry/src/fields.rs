//! Typed field table produced by telemetry source adapters.
//!
//! Adapters translate whatever the wire format is into [`VehicleRecord`]s;
//! every value is optional so that a missing or malformed parameter can be
//! told apart from a real zero.

use serde::{Deserialize, Serialize};

/// Parameters requested from the telemetry source on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Map-matched latitude/longitude pair.
    MapMatching,
    Speed,
    LateralAcceleration,
    LongitudinalAcceleration,
    YawRate,
    Odometer,
    AcceleratorPedalRatio,
    BrakeLight,
    SteeringAngle,
    ParkingBrake,
    EngineRpm,
    ResidualFuel,
    EngineTemperature,
    OutsideTemperature,
}

impl Parameter {
    /// The full parameter set, in request order.
    pub const ALL: &'static [Parameter] = &[
        Parameter::MapMatching,
        Parameter::Speed,
        Parameter::LateralAcceleration,
        Parameter::LongitudinalAcceleration,
        Parameter::YawRate,
        Parameter::Odometer,
        Parameter::AcceleratorPedalRatio,
        Parameter::BrakeLight,
        Parameter::SteeringAngle,
        Parameter::ParkingBrake,
        Parameter::EngineRpm,
        Parameter::ResidualFuel,
        Parameter::EngineTemperature,
        Parameter::OutsideTemperature,
    ];

    /// Name used by the telemetry source for this parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            Parameter::MapMatching => "MapMatching",
            Parameter::Speed => "Spd",
            Parameter::LateralAcceleration => "ALatStdByEsc",
            Parameter::LongitudinalAcceleration => "ALgtStd",
            Parameter::YawRate => "YawRateStd",
            Parameter::Odometer => "OdoDst",
            Parameter::AcceleratorPedalRatio => "AccrPedlRat",
            Parameter::BrakeLight => "BrkLiIntenReq",
            Parameter::SteeringAngle => "SteerWhlAgBas",
            Parameter::ParkingBrake => "PrkgLiIndcn",
            Parameter::EngineRpm => "EngN",
            Parameter::ResidualFuel => "RestFu",
            Parameter::EngineTemperature => "EngT",
            Parameter::OutsideTemperature => "OutdT",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|parameter| parameter.wire_name() == name)
    }
}

/// Values reported for one vehicle in one response. `None` means the source
/// omitted the parameter or sent something unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldTable {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub lateral_acceleration: Option<f64>,
    pub longitudinal_acceleration: Option<f64>,
    pub yaw_rate: Option<f64>,
    pub odometer: Option<f64>,
    /// 0-100.
    pub accelerator_pedal_ratio: Option<f64>,
    pub brake_on: Option<bool>,
    pub steering_angle: Option<f64>,
    pub parking_brake_on: Option<bool>,
    pub engine_rpm: Option<f64>,
    /// 0-255 scale.
    pub residual_fuel: Option<f64>,
    pub engine_temperature: Option<f64>,
    pub outside_temperature: Option<f64>,
}

impl FieldTable {
    /// Whether the table carries a value for `parameter`. The map-matched
    /// position counts as present only when both coordinates are.
    pub fn has(&self, parameter: Parameter) -> bool {
        match parameter {
            Parameter::MapMatching => self.latitude.is_some() && self.longitude.is_some(),
            Parameter::Speed => self.speed.is_some(),
            Parameter::LateralAcceleration => self.lateral_acceleration.is_some(),
            Parameter::LongitudinalAcceleration => self.longitudinal_acceleration.is_some(),
            Parameter::YawRate => self.yaw_rate.is_some(),
            Parameter::Odometer => self.odometer.is_some(),
            Parameter::AcceleratorPedalRatio => self.accelerator_pedal_ratio.is_some(),
            Parameter::BrakeLight => self.brake_on.is_some(),
            Parameter::SteeringAngle => self.steering_angle.is_some(),
            Parameter::ParkingBrake => self.parking_brake_on.is_some(),
            Parameter::EngineRpm => self.engine_rpm.is_some(),
            Parameter::ResidualFuel => self.residual_fuel.is_some(),
            Parameter::EngineTemperature => self.engine_temperature.is_some(),
            Parameter::OutsideTemperature => self.outside_temperature.is_some(),
        }
    }

    /// Parameters without a usable value.
    pub fn missing(&self) -> impl Iterator<Item = Parameter> + '_ {
        Parameter::ALL
            .iter()
            .copied()
            .filter(|parameter| !self.has(*parameter))
    }
}

/// One vehicle's entry in a query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Identifier the record is keyed by (the user id the client polls for).
    pub vehicle_id: String,
    /// Hardware vehicle identifier, when reported.
    pub vid: Option<String>,
    /// Source wall-clock time of the record, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub fields: FieldTable,
}

impl VehicleRecord {
    pub fn new(vehicle_id: impl Into<String>, timestamp_ms: i64, fields: FieldTable) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vid: None,
            timestamp_ms,
            fields,
        }
    }
}
