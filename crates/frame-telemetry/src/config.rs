//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::TelemetryError;

/// Log levels accepted by `TelemetryConfig::validate`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Default log filter (a level or a full `EnvFilter` directive)
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to write logs to the console at all
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "secure-frames".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            console_output: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SF_SERVICE_NAME`: Service name (default: secure-frames)
    /// - `SF_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `SF_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `SF_CONSOLE_OUTPUT`: Enable console output (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("SF_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("SF_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("SF_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            console_output: env::var("SF_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),
        }
    }

    /// Check the configuration before installing a subscriber.
    ///
    /// A bare level must be one of `trace`, `debug`, `info`, `warn`, `error`.
    /// Anything containing `=` or `,` is treated as a filter directive and
    /// checked when the filter is built.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config(
                "service_name must not be empty".to_string(),
            ));
        }

        let level = self.log_level.trim().to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LOG_LEVELS.contains(&level.as_str()) {
            return Err(TelemetryError::Config(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        Ok(())
    }
}
