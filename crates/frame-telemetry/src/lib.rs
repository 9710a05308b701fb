//! # Frame Telemetry
//!
//! Logging and metrics shared by every secure-frames crate.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter` and a pretty or JSON
//!   `fmt` layer, plus `log_event!` / `log_frame_event!` for consistent fields
//! - **Metrics**: Prometheus counters for frame lifecycle and object lookups
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frame_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Frames, buses and locators now report through tracing and prometheus
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SF_SERVICE_NAME` | `secure-frames` | Service name in logs |
//! | `SF_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also works) |
//! | `SF_JSON_LOGS` | `false` | JSON log lines |
//! | `SF_CONSOLE_OUTPUT` | `true` | Write logs to the console |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, StructuredLogger};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, FRAMES_ACTIVE,
    FRAMES_CREATED, FRAMES_TORN_DOWN, HANDSHAKES, HANDSHAKE_DURATION,
    LOCATOR_CROSS_ORIGIN_SKIPS, LOCATOR_DETACHED_SKIPS, LOCATOR_LOOKUPS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard holding the metrics handle; keep it for the lifetime of
/// the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    config.validate()?;

    // Metrics first so early lifecycle events are counted
    let metrics = register_metrics()?;
    let logger = init_logging(&config)?;

    Ok(TelemetryGuard {
        logger,
        metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    logger: StructuredLogger,
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Metrics registered by `init_telemetry`.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Logger installed by `init_telemetry`.
    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.logger.service_name(), "Shutting down telemetry");
    }
}

/// Convenience macro for creating a span with frame context.
///
/// ```rust,ignore
/// let _span = frame_span!("bootstrap", component = "hosted-fields", channel = %channel);
/// ```
#[macro_export]
macro_rules! frame_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
