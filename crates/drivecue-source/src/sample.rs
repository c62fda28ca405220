//! Offline source replaying a canned response.

use std::collections::VecDeque;
use std::time::Instant;

use async_trait::async_trait;
use drivecue_telemetry::{Parameter, TelemetryError, TelemetrySource, VehicleRecord};
use parking_lot::Mutex;
use tracing::debug;

use crate::decode::decode_response;

/// A parked vehicle with the brake light on. Odometer and parking brake are
/// absent, as they are in real captures.
pub const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>

<response>
<carinfo>
<car>
	<userid>12345678901</userid>
	<vid>12345678901234561</vid>
</car>
<data>
	<createtime>2013-11-01T12:23:58</createtime>
	<MapMatching>
		<lat>34.659628333</lat>
		<lon>135.164106667</lon>
	</MapMatching>
	<Spd>0.00</Spd>
	<ALatStdByEsc>0.287800000000001</ALatStdByEsc>
	<ALgtStd>0.431359999999998</ALgtStd>
	<YawRateStd>-0.316000000000003</YawRateStd>
	<AccrPedlRat>0</AccrPedlRat>
	<BrkLiIntenReq>1</BrkLiIntenReq>
	<SteerWhlAgBas>-22.5</SteerWhlAgBas>
	<EngN>0</EngN>
	<RestFu>100</RestFu>
	<EngT>50</EngT>
	<OutdT>67</OutdT>
</data>
</carinfo>

</response>
"#;

/// [`TelemetrySource`] that answers every query from a fixed document.
///
/// Record timestamps advance with real time since construction so the
/// scenario clock keeps running. By default every record is relabelled with
/// the id being polled, which lets the canned document stand in for any
/// configured vehicle.
#[derive(Debug)]
pub struct SampleSource {
    document: String,
    relabel: bool,
    started: Instant,
    commands: Mutex<VecDeque<String>>,
}

/// Commands kept by [`SampleSource::commands`]; older entries are dropped.
pub const COMMAND_LOG_CAPACITY: usize = 64;

impl SampleSource {
    /// Replays [`SAMPLE_DOCUMENT`] for whichever vehicle is polled.
    pub fn new() -> Self {
        Self::with_document(SAMPLE_DOCUMENT).relabelled(true)
    }

    /// Replays `document` verbatim, vehicle ids included.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            relabel: false,
            started: Instant::now(),
            commands: Mutex::new(VecDeque::with_capacity(COMMAND_LOG_CAPACITY)),
        }
    }

    /// Whether records are relabelled with the polled vehicle id.
    pub fn relabelled(mut self, relabel: bool) -> Self {
        self.relabel = relabel;
        self
    }

    /// The most recent reset and seek commands, oldest first, e.g. `seek 470`.
    ///
    /// Kept for tests and diagnostics; at most [`COMMAND_LOG_CAPACITY`] entries.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().iter().cloned().collect()
    }

    fn record_command(&self, command: String) {
        let mut commands = self.commands.lock();
        if commands.len() == COMMAND_LOG_CAPACITY {
            commands.pop_front();
        }
        commands.push_back(command);
    }

    fn elapsed_ms(&self) -> i64 {
        i64::try_from(self.started.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetrySource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn reset(&self, vehicle_id: &str) -> Result<(), TelemetryError> {
        debug!(vehicle_id, "Sample source reset");
        self.record_command("reset".to_owned());
        Ok(())
    }

    async fn seek(&self, vehicle_id: &str, offset_s: i64) -> Result<(), TelemetryError> {
        debug!(vehicle_id, offset_s, "Sample source seek");
        self.record_command(format!("seek {offset_s}"));
        Ok(())
    }

    async fn query(
        &self,
        vehicle_id: &str,
        _parameters: &[Parameter],
    ) -> Result<Vec<VehicleRecord>, TelemetryError> {
        let elapsed_ms = self.elapsed_ms();
        let mut records = decode_response(&self.document)?;
        for record in &mut records {
            record.timestamp_ms = record.timestamp_ms.saturating_add(elapsed_ms);
            if self.relabel {
                record.vehicle_id = vehicle_id.to_owned();
            }
        }
        Ok(records)
    }
}
