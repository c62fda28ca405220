//! The seam between the client and whatever transport reaches the telemetry
//! source.

use async_trait::async_trait;

use crate::{Parameter, TelemetryError, VehicleRecord};

/// A remote telemetry source keyed by vehicle/user identifier.
///
/// Implementations own the transport (and its timeout); they hand back typed
/// records and never partially-parsed documents.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Rewind the source's playback position to the scenario start.
    async fn reset(&self, vehicle_id: &str) -> Result<(), TelemetryError>;

    /// Move the source's playback position to `offset_s` seconds.
    async fn seek(&self, vehicle_id: &str, offset_s: i64) -> Result<(), TelemetryError>;

    /// Fetch current values of `parameters`. The response may hold records for
    /// zero or more vehicles, not necessarily the one asked for.
    async fn query(
        &self,
        vehicle_id: &str,
        parameters: &[Parameter],
    ) -> Result<Vec<VehicleRecord>, TelemetryError>;
}

#[async_trait]
impl<S: TelemetrySource + ?Sized> TelemetrySource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn reset(&self, vehicle_id: &str) -> Result<(), TelemetryError> {
        (**self).reset(vehicle_id).await
    }

    async fn seek(&self, vehicle_id: &str, offset_s: i64) -> Result<(), TelemetryError> {
        (**self).seek(vehicle_id, offset_s).await
    }

    async fn query(
        &self,
        vehicle_id: &str,
        parameters: &[Parameter],
    ) -> Result<Vec<VehicleRecord>, TelemetryError> {
        (**self).query(vehicle_id, parameters).await
    }
}
