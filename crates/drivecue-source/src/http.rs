//! Live transport over HTTP(S).

use std::time::Duration;

use async_trait::async_trait;
use drivecue_telemetry::{Parameter, TelemetryError, TelemetrySource, VehicleRecord};
use reqwest::{Client, Url};
use tracing::{debug, trace};

use crate::decode::decode_response;
use crate::request::{Service, ServiceEndpoint};

/// Connection settings for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Scheme and host, e.g. `https://api-jp-t-itc.com`.
    pub base_url: String,
    pub api_key: String,
    /// Applied to each request as a whole, connect through body.
    pub timeout: Duration,
}

impl HttpSourceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(5_000),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`TelemetrySource`] backed by the remote vehicle data service.
#[derive(Debug, Clone)]
pub struct HttpSource {
    endpoint: ServiceEndpoint,
    client: Client,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, TelemetryError> {
        let endpoint = ServiceEndpoint::new(&config.base_url, config.api_key)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("drivecue/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TelemetryError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint,
            client,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Issue a command whose response body carries nothing we need.
    async fn command(&self, service: Service, url: Url) -> Result<(), TelemetryError> {
        let response = self.send(service, url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::CommandRejected {
                command: service.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        Ok(())
    }

    async fn send(&self, service: Service, url: Url) -> Result<reqwest::Response, TelemetryError> {
        debug!(%service, path = url.path(), "Calling vehicle data service");
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, error: reqwest::Error) -> TelemetryError {
        if error.is_timeout() {
            TelemetryError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            // Drop the URL so the API key never lands in a status line.
            TelemetryError::Transport(error.without_url().to_string())
        }
    }
}

#[async_trait]
impl TelemetrySource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn reset(&self, vehicle_id: &str) -> Result<(), TelemetryError> {
        self.command(Service::Reset, self.endpoint.reset_url(vehicle_id))
            .await
    }

    async fn seek(&self, vehicle_id: &str, offset_s: i64) -> Result<(), TelemetryError> {
        self.command(Service::Seek, self.endpoint.seek_url(vehicle_id, offset_s))
            .await
    }

    async fn query(
        &self,
        vehicle_id: &str,
        parameters: &[Parameter],
    ) -> Result<Vec<VehicleRecord>, TelemetryError> {
        let url = self.endpoint.query_url(vehicle_id, parameters);
        let response = self.send(Service::VehicleInfo, url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Transport(format!(
                "vehicle data service answered HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        trace!(bytes = body.len(), "Vehicle data response received");
        decode_response(&body)
    }
}
