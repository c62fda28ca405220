//! XML response decoding.

use chrono::NaiveDateTime;
use drivecue_telemetry::{FieldTable, Parameter, TelemetryError, VehicleRecord};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{trace, warn};

/// `createtime` layout: local date and 24-hour time, read as UTC.
pub const CREATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a `createtime` value into milliseconds since the Unix epoch.
pub fn parse_createtime(text: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(text.trim(), CREATETIME_FORMAT)
        .ok()
        .map(|time| time.and_utc().timestamp_millis())
}

/// Decode a service response into one record per `<carinfo>` element.
///
/// Unknown elements are ignored and unparseable values leave the field empty.
/// A `<carinfo>` without `car/userid` or a parseable `data/createtime` is
/// skipped. The response is malformed when its body is empty, its XML is
/// broken, or every `<carinfo>` it carries was skipped.
pub fn decode_response(body: &str) -> Result<Vec<VehicleRecord>, TelemetryError> {
    if body.trim().is_empty() {
        return Err(TelemetryError::malformed("empty response body"));
    }

    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut path: Vec<String> = Vec::new();
    let mut pending: Option<(usize, PendingRecord)> = None;
    let mut records = Vec::new();
    let mut first_rejection: Option<TelemetryError> = None;
    let mut saw_element = false;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| TelemetryError::malformed(format!("invalid XML: {e}")))?
        {
            Event::Start(element) => {
                saw_element = true;
                path.push(local_name(&element)?);
                if pending.is_none() && path.last().is_some_and(|name| name == "carinfo") {
                    pending = Some((path.len(), PendingRecord::default()));
                }
            }
            Event::Empty(_) => saw_element = true,
            Event::Text(text) => {
                if let Some((depth, record)) = pending.as_mut() {
                    record.assign(path.get(*depth..).unwrap_or_default(), utf8(&text)?);
                }
            }
            Event::CData(data) => {
                if let Some((depth, record)) = pending.as_mut() {
                    record.assign(path.get(*depth..).unwrap_or_default(), utf8(&data)?);
                }
            }
            Event::End(_) => {
                if pending.as_ref().is_some_and(|(depth, _)| *depth == path.len())
                    && let Some((_, record)) = pending.take()
                {
                    match record.finish() {
                        Ok(record) => records.push(record),
                        Err(error) => {
                            warn!(%error, "Skipping undecodable vehicle record");
                            first_rejection.get_or_insert(error);
                        }
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_element {
        return Err(TelemetryError::malformed("response contains no XML elements"));
    }
    if pending.is_some() {
        return Err(TelemetryError::malformed("truncated <carinfo> element"));
    }
    if records.is_empty()
        && let Some(error) = first_rejection
    {
        return Err(error);
    }

    trace!(records = records.len(), "Decoded telemetry response");
    Ok(records)
}

fn local_name(element: &BytesStart<'_>) -> Result<String, TelemetryError> {
    let name = element.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_owned)
        .map_err(|e| TelemetryError::malformed(format!("element name is not UTF-8: {e}")))
}

fn utf8(bytes: &[u8]) -> Result<&str, TelemetryError> {
    std::str::from_utf8(bytes)
        .map(str::trim)
        .map_err(|e| TelemetryError::malformed(format!("text is not UTF-8: {e}")))
}

#[derive(Debug, Default)]
struct PendingRecord {
    vehicle_id: Option<String>,
    vid: Option<String>,
    createtime: Option<String>,
    fields: FieldTable,
}

impl PendingRecord {
    /// Store `text` found at `path`, relative to the `<carinfo>` element.
    fn assign(&mut self, path: &[String], text: &str) {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["car", "userid"] => self.vehicle_id = Some(text.to_owned()),
            ["car", "vid"] => self.vid = Some(text.to_owned()),
            ["data", "createtime"] => self.createtime = Some(text.to_owned()),
            ["data", "MapMatching", "lat"] => self.fields.latitude = number(text),
            ["data", "MapMatching", "lon"] => self.fields.longitude = number(text),
            ["data", name] => {
                if let Some(parameter) = Parameter::from_wire_name(name) {
                    assign_parameter(&mut self.fields, parameter, text);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<VehicleRecord, TelemetryError> {
        let vehicle_id = self
            .vehicle_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TelemetryError::malformed("<carinfo> without car/userid"))?;
        let createtime = self.createtime.ok_or_else(|| {
            TelemetryError::malformed(format!("record for {vehicle_id} has no createtime"))
        })?;
        let timestamp_ms = parse_createtime(&createtime).ok_or_else(|| {
            TelemetryError::malformed(format!(
                "record for {vehicle_id} has unparseable createtime {createtime:?}"
            ))
        })?;

        let mut record = VehicleRecord::new(vehicle_id, timestamp_ms, self.fields);
        record.vid = self.vid.filter(|vid| !vid.is_empty());
        Ok(record)
    }
}

fn assign_parameter(fields: &mut FieldTable, parameter: Parameter, text: &str) {
    match parameter {
        // Position arrives through its lat/lon children.
        Parameter::MapMatching => {}
        Parameter::Speed => fields.speed = number(text),
        Parameter::LateralAcceleration => fields.lateral_acceleration = number(text),
        Parameter::LongitudinalAcceleration => fields.longitudinal_acceleration = number(text),
        Parameter::YawRate => fields.yaw_rate = number(text),
        Parameter::Odometer => fields.odometer = number(text),
        Parameter::AcceleratorPedalRatio => fields.accelerator_pedal_ratio = number(text),
        Parameter::BrakeLight => fields.brake_on = flag(text),
        Parameter::SteeringAngle => fields.steering_angle = number(text),
        Parameter::ParkingBrake => fields.parking_brake_on = flag(text),
        Parameter::EngineRpm => fields.engine_rpm = number(text),
        Parameter::ResidualFuel => fields.residual_fuel = number(text),
        Parameter::EngineTemperature => fields.engine_temperature = number(text),
        Parameter::OutsideTemperature => fields.outside_temperature = number(text),
    }
}

fn number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn flag(text: &str) -> Option<bool> {
    text.parse::<i64>().ok().map(|value| value > 0)
}
