//! Client behaviour against a scripted telemetry source.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use drivecue_telemetry::{
    AxisVerdict, FieldTable, Parameter, PollOutcome, STATUS_NO_DATA, STATUS_RECEIVED,
    TelemetryClient, TelemetryError, TelemetrySource, VehicleRecord,
};
use parking_lot::Mutex;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const VEHICLE: &str = "usSF-413";
const T0_MS: i64 = 1_383_308_638_000;
const LAT: f64 = 34.659_628;
const LON: f64 = 135.164_106;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Reset,
    Seek(i64),
    Query(usize),
}

#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<VehicleRecord>, TelemetryError>>>,
    commands: Mutex<Vec<Command>>,
    reject_commands: Mutex<bool>,
}

impl ScriptedSource {
    fn push(&self, response: Result<Vec<VehicleRecord>, TelemetryError>) {
        self.responses.lock().push_back(response);
    }

    fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    fn query_count(&self) -> usize {
        self.commands()
            .iter()
            .filter(|command| matches!(command, Command::Query(_)))
            .count()
    }

    fn command_result(&self, command: &str) -> Result<(), TelemetryError> {
        if *self.reject_commands.lock() {
            return Err(TelemetryError::CommandRejected {
                command: command.to_string(),
                reason: "HTTP 503".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn reset(&self, _vehicle_id: &str) -> Result<(), TelemetryError> {
        self.commands.lock().push(Command::Reset);
        self.command_result("reset")
    }

    async fn seek(&self, _vehicle_id: &str, offset_s: i64) -> Result<(), TelemetryError> {
        self.commands.lock().push(Command::Seek(offset_s));
        self.command_result("seek")
    }

    async fn query(
        &self,
        _vehicle_id: &str,
        parameters: &[Parameter],
    ) -> Result<Vec<VehicleRecord>, TelemetryError> {
        self.commands.lock().push(Command::Query(parameters.len()));
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn full_fields(lat: f64, lon: f64, speed: f64) -> FieldTable {
    FieldTable {
        latitude: Some(lat),
        longitude: Some(lon),
        speed: Some(speed),
        lateral_acceleration: Some(0.29),
        longitudinal_acceleration: Some(0.43),
        yaw_rate: Some(-0.32),
        odometer: Some(1520.0),
        accelerator_pedal_ratio: Some(12.0),
        brake_on: Some(false),
        steering_angle: Some(-22.5),
        parking_brake_on: Some(false),
        engine_rpm: Some(1800.0),
        residual_fuel: Some(100.0),
        engine_temperature: Some(50.0),
        outside_temperature: Some(67.0),
    }
}

fn record(vehicle_id: &str, timestamp_ms: i64, fields: FieldTable) -> VehicleRecord {
    VehicleRecord::new(vehicle_id, timestamp_ms, fields)
}

fn client_with(source: ScriptedSource) -> TelemetryClient<ScriptedSource> {
    TelemetryClient::new(VEHICLE, source)
}

#[tokio::test]
async fn poll_populates_snapshot() -> TestResult {
    let source = ScriptedSource::default();
    let mut first = record(VEHICLE, T0_MS, full_fields(LAT, LON, 42.0));
    first.vid = Some("12345678901234561".to_string());
    source.push(Ok(vec![first]));
    let client = client_with(source);

    let outcome = client.poll().await?;
    assert!(outcome.is_received());

    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, STATUS_RECEIVED);
    assert_eq!(snapshot.time_s, 0);
    assert_eq!(snapshot.vid.as_deref(), Some("12345678901234561"));
    assert!((snapshot.position.latitude - LAT).abs() < 1e-9);
    assert!((snapshot.position.longitude - LON).abs() < 1e-9);
    assert!((snapshot.speed - 42.0).abs() < f64::EPSILON);
    assert!((snapshot.steering_angle - -22.5).abs() < f64::EPSILON);
    assert_eq!(
        client.source().commands(),
        vec![Command::Query(Parameter::ALL.len())]
    );
    Ok(())
}

#[tokio::test]
async fn missing_fields_keep_previous_values() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 42.0))]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 1_000,
        FieldTable {
            speed: Some(43.5),
            ..Default::default()
        },
    )]));
    let client = client_with(source);

    client.poll().await?;
    client.poll().await?;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.time_s, 1);
    assert!((snapshot.speed - 43.5).abs() < f64::EPSILON);
    assert!((snapshot.residual_fuel - 100.0).abs() < f64::EPSILON);
    assert!((snapshot.engine_rpm - 1800.0).abs() < f64::EPSILON);
    assert!((snapshot.position.latitude - LAT).abs() < 1e-9);
    assert_eq!(snapshot.status, STATUS_RECEIVED);
    Ok(())
}

#[tokio::test]
async fn other_vehicles_are_skipped() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 42.0))]));
    source.push(Ok(vec![record(
        "usSF-411",
        T0_MS + 1_000,
        full_fields(LAT, LON, 99.0),
    )]));
    source.push(Ok(vec![
        record("usSF-411", T0_MS + 2_000, full_fields(LAT, LON, 99.0)),
        record(VEHICLE, T0_MS + 2_000, full_fields(LAT, LON, 44.0)),
    ]));
    let client = client_with(source);

    client.poll().await?;
    let outcome = client.poll().await?;
    assert_eq!(outcome, PollOutcome::NoVehicleData);
    let snapshot = client.snapshot();
    assert_eq!(snapshot.status, STATUS_NO_DATA);
    assert!((snapshot.speed - 42.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.time_s, 0);

    client.poll().await?;
    assert!((client.snapshot().speed - 44.0).abs() < f64::EPSILON);
    assert_eq!(client.time_s(), 2);
    Ok(())
}

#[tokio::test]
async fn transport_failure_is_absorbed_into_status() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 42.0))]));
    source.push(Err(TelemetryError::Transport("connection refused".into())));
    let client = client_with(source);

    client.poll().await?;
    let before = client.snapshot();

    let result = client.poll().await;
    assert_eq!(
        result,
        Err(TelemetryError::Transport("connection refused".into()))
    );

    let after = client.snapshot();
    assert!(after.status.contains("connection refused"));
    assert_eq!(
        TelemetrySnapshotFields::from(&after),
        TelemetrySnapshotFields::from(&before)
    );
    Ok(())
}

#[tokio::test]
async fn seek_shifts_origin_but_keeps_anchor() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 0.0))]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 12_500,
        full_fields(LAT, LON, 0.0),
    )]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 14_000,
        full_fields(LAT, LON, 0.0),
    )]));
    let client = client_with(source);

    client.poll().await?;
    client.seek(300).await?;
    assert_eq!(client.time_s(), 12 + 300);

    client.poll().await?;
    assert_eq!(client.time_s(), 14 + 300);

    let time_base = client.time_base().await;
    assert_eq!(time_base.anchor_wall_ms(), Some(T0_MS));
    assert_eq!(time_base.scenario_origin_s(), 300);
    assert_eq!(
        client.source().commands(),
        vec![
            Command::Query(Parameter::ALL.len()),
            Command::Seek(300),
            Command::Query(Parameter::ALL.len()),
            Command::Query(Parameter::ALL.len()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn reset_returns_origin_to_zero() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 0.0))]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 3_000,
        full_fields(LAT, LON, 0.0),
    )]));
    let client = client_with(source);

    client.seek(800).await?;
    assert_eq!(client.time_s(), 800);

    client.reset().await?;
    assert_eq!(client.time_s(), 3);
    assert_eq!(client.time_base().await.scenario_origin_s(), 0);
    assert_eq!(client.source().commands().get(2), Some(&Command::Reset));
    Ok(())
}

#[tokio::test]
async fn rejected_seek_skips_poll_and_keeps_origin() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 0.0))]));
    let client = client_with(source);
    client.poll().await?;

    *client.source().reject_commands.lock() = true;
    let result = client.seek(470).await;
    assert!(matches!(
        result,
        Err(TelemetryError::CommandRejected { .. })
    ));
    assert_eq!(client.source().query_count(), 1);
    assert_eq!(client.time_base().await.scenario_origin_s(), 0);
    assert!(client.status().starts_with("Telemetry seek failed"));
    Ok(())
}

#[tokio::test]
async fn latitude_jump_extrapolates_latitude_only() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 30.0))]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 1_000,
        full_fields(LAT + 0.0003, LON + 0.0002, 30.0),
    )]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 2_000,
        full_fields(LAT + 0.0103, LON + 0.0003, 30.0),
    )]));
    let client = client_with(source);

    client.poll().await?;
    client.poll().await?;
    let outcome = client.poll().await?;

    let PollOutcome::Received(estimate) = outcome else {
        return Err("expected vehicle data".into());
    };
    assert_eq!(estimate.latitude, AxisVerdict::Extrapolated);
    assert_eq!(estimate.longitude, AxisVerdict::Accepted);

    let snapshot = client.snapshot();
    assert!((snapshot.position.latitude - (LAT + 0.0006)).abs() < 1e-9);
    assert!((snapshot.position.longitude - (LON + 0.0003)).abs() < 1e-9);
    assert_eq!(snapshot.status, "Extrapolating latitude");

    let raw = client.raw_position().await.ok_or("raw fix missing")?;
    assert!((raw.latitude - (LAT + 0.0103)).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn skip_forward_seeks_relative_to_current_time() -> TestResult {
    let source = ScriptedSource::default();
    source.push(Ok(vec![record(VEHICLE, T0_MS, full_fields(LAT, LON, 0.0))]));
    source.push(Ok(vec![record(
        VEHICLE,
        T0_MS + 1_000,
        full_fields(LAT, LON, 0.0),
    )]));
    let client = client_with(source);

    client.seek(1780).await?;
    client.skip_forward(300).await?;
    assert!(client.source().commands().contains(&Command::Seek(2080)));
    assert_eq!(client.time_s(), 2081);
    Ok(())
}

#[tokio::test]
async fn concurrent_polls_are_serialized() -> TestResult {
    let source = ScriptedSource::default();
    for tick in 0..8 {
        source.push(Ok(vec![record(
            VEHICLE,
            T0_MS + tick * 1_000,
            full_fields(LAT, LON, 10.0),
        )]));
    }
    let client = Arc::new(client_with(source));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move { client.poll().await }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(client.source().query_count(), 8);
    assert_eq!(client.time_s(), 7);
    Ok(())
}

/// Snapshot values excluding the status line.
#[derive(Debug, PartialEq)]
struct TelemetrySnapshotFields {
    time_s: i64,
    latitude: f64,
    longitude: f64,
    speed: f64,
    residual_fuel: f64,
    brake_on: bool,
}

impl From<&drivecue_telemetry::TelemetrySnapshot> for TelemetrySnapshotFields {
    fn from(snapshot: &drivecue_telemetry::TelemetrySnapshot) -> Self {
        Self {
            time_s: snapshot.time_s,
            latitude: snapshot.position.latitude,
            longitude: snapshot.position.longitude,
            speed: snapshot.speed,
            residual_fuel: snapshot.residual_fuel,
            brake_on: snapshot.brake_on,
        }
    }
}
