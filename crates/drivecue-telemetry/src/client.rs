//! Polling client for one vehicle.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    GeoPoint, Parameter, PositionEstimate, PositionEstimator, STATUS_NO_DATA, STATUS_RECEIVED,
    TelemetryError, TelemetrySnapshot, TelemetrySource, TimeBase, VehicleRecord,
};

/// What a successful round trip produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PollOutcome {
    /// The vehicle was in the response and the snapshot was replaced.
    Received(PositionEstimate),
    /// The response held no record for this vehicle; the snapshot is unchanged
    /// apart from its status.
    NoVehicleData,
}

impl PollOutcome {
    pub fn is_received(&self) -> bool {
        matches!(self, PollOutcome::Received(_))
    }
}

/// State mutated by every compound operation.
#[derive(Debug, Default)]
struct SyncState {
    time_base: TimeBase,
    estimator: PositionEstimator,
}

/// Keeps a local copy of one vehicle's state by polling a [`TelemetrySource`].
///
/// `poll`, `seek` and `reset` are mutually exclusive: each one holds the
/// client's critical section across its source round trip. The snapshot is
/// published separately and can be read at any time without waiting for an
/// in-flight poll.
pub struct TelemetryClient<S> {
    vehicle_id: String,
    source: S,
    sync: Mutex<SyncState>,
    snapshot: RwLock<TelemetrySnapshot>,
}

impl<S: TelemetrySource> TelemetryClient<S> {
    pub fn new(vehicle_id: impl Into<String>, source: S) -> Self {
        let vehicle_id = vehicle_id.into();
        Self {
            snapshot: RwLock::new(TelemetrySnapshot::new(vehicle_id.clone())),
            vehicle_id,
            source,
            sync: Mutex::new(SyncState::default()),
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Copy of the latest snapshot.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot.read().clone()
    }

    pub fn status(&self) -> String {
        self.snapshot.read().status.clone()
    }

    /// Current scenario time in seconds.
    pub fn time_s(&self) -> i64 {
        self.snapshot.read().time_s
    }

    pub fn position(&self) -> GeoPoint {
        self.snapshot.read().position
    }

    /// Current time base. Waits for any in-flight operation.
    pub async fn time_base(&self) -> TimeBase {
        self.sync.lock().await.time_base
    }

    /// Last raw (unsmoothed) fix. Waits for any in-flight operation.
    pub async fn raw_position(&self) -> Option<GeoPoint> {
        self.sync.lock().await.estimator.last_raw()
    }

    /// Rewind the source to the start of the scenario and poll.
    pub async fn reset(&self) -> Result<PollOutcome, TelemetryError> {
        let mut sync = self.sync.lock().await;
        if let Err(err) = self.source.reset(&self.vehicle_id).await {
            return Err(self.fail("reset", err));
        }
        sync.time_base.set_origin(0);
        info!(vehicle_id = %self.vehicle_id, "Telemetry source reset");
        self.poll_locked(&mut sync).await
    }

    /// Jump the source to `target_s` seconds into the scenario and poll.
    pub async fn seek(&self, target_s: i64) -> Result<PollOutcome, TelemetryError> {
        let mut sync = self.sync.lock().await;
        self.seek_locked(&mut sync, target_s).await
    }

    /// Seek `delta_s` seconds past the current scenario time.
    pub async fn skip_forward(&self, delta_s: i64) -> Result<PollOutcome, TelemetryError> {
        let mut sync = self.sync.lock().await;
        let target_s = self.time_s().saturating_add(delta_s);
        self.seek_locked(&mut sync, target_s).await
    }

    /// Query the source and fold this vehicle's record into the snapshot.
    ///
    /// On error the snapshot keeps its previous values and `status` carries
    /// the error text.
    pub async fn poll(&self) -> Result<PollOutcome, TelemetryError> {
        let mut sync = self.sync.lock().await;
        self.poll_locked(&mut sync).await
    }

    async fn seek_locked(
        &self,
        sync: &mut SyncState,
        target_s: i64,
    ) -> Result<PollOutcome, TelemetryError> {
        if let Err(err) = self.source.seek(&self.vehicle_id, target_s).await {
            return Err(self.fail("seek", err));
        }
        sync.time_base.set_origin(target_s);
        info!(vehicle_id = %self.vehicle_id, target_s, "Telemetry source seek");
        self.poll_locked(sync).await
    }

    async fn poll_locked(&self, sync: &mut SyncState) -> Result<PollOutcome, TelemetryError> {
        let records = match self.source.query(&self.vehicle_id, Parameter::ALL).await {
            Ok(records) => records,
            Err(err) => return Err(self.fail("poll", err)),
        };

        let Some(record) = self.select_record(records) else {
            self.snapshot.write().status = STATUS_NO_DATA.to_string();
            return Ok(PollOutcome::NoVehicleData);
        };

        let mut next = self.snapshot();

        sync.time_base.record_anchor_if_unset(record.timestamp_ms);
        if let Some(time_s) = sync.time_base.scenario_time_for(record.timestamp_ms) {
            next.time_s = time_s;
        }

        for parameter in record.fields.missing() {
            warn!(
                vehicle_id = %self.vehicle_id,
                parameter = parameter.wire_name(),
                "Missing telemetry parameter, keeping previous value"
            );
        }

        let previous = sync.estimator.estimated();
        let raw = GeoPoint::new(
            record.fields.latitude.unwrap_or(previous.latitude),
            record.fields.longitude.unwrap_or(previous.longitude),
        );
        let estimate = sync.estimator.estimate(raw);
        next.position = estimate.position;

        if let Some(vid) = record.vid {
            next.vid = Some(vid);
        }
        next.merge_fields(&record.fields);

        next.status = match estimate.extrapolation_note() {
            Some(note) => {
                warn!(vehicle_id = %self.vehicle_id, raw = %raw, estimated = %estimate.position, "{note}");
                note.to_string()
            }
            None => STATUS_RECEIVED.to_string(),
        };

        debug!(
            vehicle_id = %self.vehicle_id,
            time_s = next.time_s,
            position = %next.position,
            speed = next.speed,
            "Vehicle data received"
        );

        *self.snapshot.write() = next;
        Ok(PollOutcome::Received(estimate))
    }

    /// First record for this vehicle; records for other vehicles are skipped.
    fn select_record(&self, records: Vec<VehicleRecord>) -> Option<VehicleRecord> {
        for record in records {
            if record.vehicle_id == self.vehicle_id {
                return Some(record);
            }
            debug!(
                expected = %self.vehicle_id,
                actual = %record.vehicle_id,
                "Skipping record for another vehicle"
            );
        }
        None
    }

    fn fail(&self, operation: &str, err: TelemetryError) -> TelemetryError {
        error!(
            vehicle_id = %self.vehicle_id,
            source = self.source.name(),
            operation,
            error = %err,
            "Telemetry source request failed"
        );
        self.snapshot.write().status = format!("Telemetry {operation} failed: {err}");
        err
    }
}

impl<S> std::fmt::Debug for TelemetryClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("vehicle_id", &self.vehicle_id)
            .field("snapshot", &*self.snapshot.read())
            .finish_non_exhaustive()
    }
}
