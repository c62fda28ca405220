//! `drivecuectl` configuration: YAML file, then flag and environment overrides.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use drivecue_telemetry::ScenarioBookmarks;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// Which telemetry source to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The remote vehicle data service.
    Http,
    /// Built-in sample response, no network.
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveCueConfig {
    /// User id the service keys vehicles by.
    pub vehicle_id: String,
    pub source: SourceKind,
    /// Service host, or a full base URL when it carries a scheme.
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Scenario offsets, in seconds, reachable with `seek --bookmark`.
    pub bookmarks: ScenarioBookmarks,
    pub skip_step_s: i64,
}

impl Default for DriveCueConfig {
    fn default() -> Self {
        Self {
            vehicle_id: "usSF-413".to_string(),
            source: SourceKind::Http,
            host: "api-jp-t-itc.com".to_string(),
            api_key: None,
            request_timeout_ms: 5_000,
            poll_interval_ms: 200,
            bookmarks: ScenarioBookmarks::default(),
            skip_step_s: 5 * 60,
        }
    }
}

impl DriveCueConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: DriveCueConfig = serde_yaml::from_str(&content)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Base URL for the HTTP source.
    pub fn base_url(&self) -> String {
        if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        }
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.vehicle_id.trim().is_empty() {
            return Err(CliError::InvalidConfiguration(
                "vehicle_id must not be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(CliError::InvalidConfiguration(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(CliError::InvalidConfiguration(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.skip_step_s <= 0 {
            return Err(CliError::InvalidConfiguration(format!(
                "skip_step_s must be positive, got {}",
                self.skip_step_s
            )));
        }
        if let Some(offset) = self.bookmarks.iter().find(|offset| *offset < 0) {
            return Err(CliError::InvalidConfiguration(format!(
                "bookmark offsets must not be negative, got {offset}"
            )));
        }
        if self.source == SourceKind::Http {
            if self.host.trim().is_empty() {
                return Err(CliError::InvalidConfiguration(
                    "host must not be empty".to_string(),
                ));
            }
            if self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
                return Err(CliError::InvalidConfiguration(
                    "the http source needs an API key (set DRIVECUE_API_KEY or api_key)"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample_config() -> DriveCueConfig {
        DriveCueConfig {
            source: SourceKind::Sample,
            ..DriveCueConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let config = DriveCueConfig::default();
        assert_eq!(config.vehicle_id, "usSF-413");
        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.skip_step_s, 300);
        assert_eq!(
            config.bookmarks.iter().collect::<Vec<_>>(),
            vec![0, 470, 800, 1780, 1950, 2470, 2650]
        );
        assert_eq!(config.base_url(), "https://api-jp-t-itc.com");
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> TestResult {
        let config: DriveCueConfig = serde_yaml::from_str(
            "vehicle_id: usSF-411\nsource: sample\nbookmarks: [0, 60]\n",
        )?;
        assert_eq!(config.vehicle_id, "usSF-411");
        assert_eq!(config.source, SourceKind::Sample);
        assert_eq!(config.bookmarks.get(1), Some(60));
        assert_eq!(config.request_timeout_ms, 5_000);
        Ok(())
    }

    #[test]
    fn host_with_scheme_is_used_verbatim() {
        let config = DriveCueConfig {
            host: "http://127.0.0.1:8080".to_string(),
            ..DriveCueConfig::default()
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn validation() {
        assert!(matches!(sample_config().validate(), Ok(())));

        let invalid = [
            DriveCueConfig {
                vehicle_id: " ".to_string(),
                ..sample_config()
            },
            DriveCueConfig {
                poll_interval_ms: 0,
                ..sample_config()
            },
            DriveCueConfig {
                request_timeout_ms: 0,
                ..sample_config()
            },
            DriveCueConfig {
                skip_step_s: 0,
                ..sample_config()
            },
            DriveCueConfig {
                bookmarks: ScenarioBookmarks::new(vec![0, -5]),
                ..sample_config()
            },
            DriveCueConfig::default(),
        ];
        for config in invalid {
            assert!(
                matches!(config.validate(), Err(CliError::InvalidConfiguration(_))),
                "{config:?} should be rejected"
            );
        }

        let with_key = DriveCueConfig {
            api_key: Some("KEY".to_string()),
            ..DriveCueConfig::default()
        };
        assert!(matches!(with_key.validate(), Ok(())));
    }
}
