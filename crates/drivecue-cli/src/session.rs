//! One vehicle's polling session: telemetry client plus everything fed from
//! its snapshot after each tick.

use std::time::Duration;

use drivecue_classifier::{DrivingState, DrivingStateClassifier, StateTracker, StateTransition};
use drivecue_source::{HttpSource, HttpSourceConfig, SampleSource};
use drivecue_telemetry::{
    TelemetryClient, TelemetryError, TelemetrySnapshot, TelemetrySource, TripSummary,
    TripTracker,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{DriveCueConfig, SourceKind};
use crate::error::CliError;

pub type DynSource = Box<dyn TelemetrySource>;

/// Build the configured telemetry source.
pub fn build_source(config: &DriveCueConfig) -> Result<DynSource, CliError> {
    match config.source {
        SourceKind::Sample => Ok(Box::new(SampleSource::new())),
        SourceKind::Http => {
            let source = HttpSource::new(
                HttpSourceConfig::new(config.base_url(), config.api_key.clone().unwrap_or_default())
                    .with_timeout(Duration::from_millis(config.request_timeout_ms)),
            )?;
            Ok(Box::new(source))
        }
    }
}

/// Result of one poll-then-classify cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub snapshot: TelemetrySnapshot,
    pub state: DrivingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<StateTransition>,
    pub trip_started: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "error_text"
    )]
    pub error: Option<TelemetryError>,
}

fn error_text<S: serde::Serializer>(
    error: &Option<TelemetryError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.collect_str(err),
        None => serializer.serialize_none(),
    }
}

pub struct Session<S = DynSource> {
    client: TelemetryClient<S>,
    classifier: DrivingStateClassifier,
    states: StateTracker,
    trip: TripTracker,
}

impl Session<DynSource> {
    pub fn from_config(config: &DriveCueConfig) -> Result<Self, CliError> {
        config.validate()?;
        let source = build_source(config)?;
        info!(
            vehicle_id = %config.vehicle_id,
            source = source.name(),
            "Starting telemetry session"
        );
        Ok(Self::new(TelemetryClient::new(config.vehicle_id.clone(), source)))
    }
}

impl<S: TelemetrySource> Session<S> {
    pub fn new(client: TelemetryClient<S>) -> Self {
        Self {
            client,
            classifier: DrivingStateClassifier::new(),
            states: StateTracker::new(),
            trip: TripTracker::new(),
        }
    }

    /// Poll the source, then classify the resulting snapshot.
    pub async fn tick(&mut self) -> Tick {
        let result = self.client.poll().await;
        self.observe(result.err())
    }

    /// Seek and classify the snapshot the seek polled.
    pub async fn seek(&mut self, target_s: i64) -> Tick {
        let result = self.client.seek(target_s).await;
        self.observe(result.err())
    }

    pub async fn skip_forward(&mut self, delta_s: i64) -> Tick {
        let result = self.client.skip_forward(delta_s).await;
        self.observe(result.err())
    }

    /// Rewind the source and start classification over.
    pub async fn reset(&mut self) -> Tick {
        let result = self.client.reset().await;
        self.classifier.reset();
        self.states.reset();
        self.observe(result.err())
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &TelemetryClient<S> {
        &self.client
    }

    pub fn trip_summary(&self) -> Option<TripSummary> {
        self.trip.summary(&self.client.snapshot())
    }

    fn observe(&mut self, error: Option<TelemetryError>) -> Tick {
        let snapshot = self.client.snapshot();
        let state = self.classifier.update(&snapshot);
        let transition = self.states.observe(state);
        let trip_started = self.trip.observe(&snapshot);
        if trip_started {
            info!(time_s = snapshot.time_s, odometer = snapshot.odometer, "Trip started");
        }
        debug!(%state, status = %snapshot.status, "Tick complete");

        Tick {
            snapshot,
            state,
            transition,
            trip_started,
            error,
        }
    }
}
