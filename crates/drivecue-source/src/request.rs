//! Command URLs for the vehicle data service.

use std::fmt;

use drivecue_telemetry::{Parameter, TelemetryError};
use reqwest::Url;

/// Service operations exposed under `/DataSender/services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Rewind playback to the scenario start.
    Reset,
    /// Move playback to an offset in seconds.
    Seek,
    /// Current values of the requested parameters.
    VehicleInfo,
}

impl Service {
    pub fn path_name(self) -> &'static str {
        match self {
            Service::Reset => "SearchDataReset",
            Service::Seek => "SearchDataSeek",
            Service::VehicleInfo => "GetVehicleInfo",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_name())
    }
}

/// Base URL plus API key; every request carries both the key and the
/// vehicle's user id.
#[derive(Clone)]
pub struct ServiceEndpoint {
    base: Url,
    api_key: String,
}

impl ServiceEndpoint {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, TelemetryError> {
        let base = Url::parse(base_url)
            .map_err(|e| TelemetryError::Transport(format!("invalid base URL {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(TelemetryError::Transport(format!(
                "base URL {base_url:?} cannot carry a path"
            )));
        }
        Ok(Self {
            base,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn reset_url(&self, vehicle_id: &str) -> Url {
        self.preamble(Service::Reset, vehicle_id)
    }

    pub fn seek_url(&self, vehicle_id: &str, offset_s: i64) -> Url {
        let mut url = self.preamble(Service::Seek, vehicle_id);
        url.query_pairs_mut()
            .append_pair("seekseconds", &offset_s.to_string());
        url
    }

    /// `GetVehicleInfo` asking for the latest (`now`) value of each parameter.
    pub fn query_url(&self, vehicle_id: &str, parameters: &[Parameter]) -> Url {
        let mut url = self.preamble(Service::VehicleInfo, vehicle_id);
        {
            let mut query = url.query_pairs_mut();
            query.append_key_only("now");
            for parameter in parameters {
                query.append_pair(parameter.wire_name(), "1");
            }
        }
        url
    }

    fn preamble(&self, service: Service, vehicle_id: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("/DataSender/services/{}", service.path_name()));
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("apilkey", &self.api_key)
            .append_pair("userid", vehicle_id);
        url
    }
}

impl fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("base", &self.base.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}
