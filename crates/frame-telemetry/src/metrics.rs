//! Prometheus metrics for secure frames.
//!
//! All metrics follow the naming convention: `sf_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., frames_created_total)
//! - **Gauge**: Value that can go up or down (e.g., frames_active)
//! - **Histogram**: Distribution of values (e.g., handshake_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // FRAME LIFECYCLE METRICS
    // =========================================================================

    /// Frames created by parent components
    pub static ref FRAMES_CREATED: CounterVec = CounterVec::new(
        Opts::new("sf_lifecycle_frames_created_total", "Frames created by parent components"),
        &["integration"]
    ).expect("metric creation failed");

    /// Frames torn down by parent components
    pub static ref FRAMES_TORN_DOWN: CounterVec = CounterVec::new(
        Opts::new("sf_lifecycle_frames_torn_down_total", "Frames torn down by parent components"),
        &["integration"]
    ).expect("metric creation failed");

    /// Frames currently attached
    pub static ref FRAMES_ACTIVE: Gauge = Gauge::new(
        "sf_lifecycle_frames_active",
        "Number of frames currently attached"
    ).expect("metric creation failed");

    /// Configuration handshakes by outcome
    pub static ref HANDSHAKES: CounterVec = CounterVec::new(
        Opts::new("sf_lifecycle_handshakes_total", "Configuration handshakes"),
        &["integration", "outcome"]  // outcome: completed/timed_out/unanswered/closed
    ).expect("metric creation failed");

    /// Handshake duration as seen by the child
    pub static ref HANDSHAKE_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sf_lifecycle_handshake_duration_seconds",
            "Time spent in the configuration handshake"
        ).buckets(exponential_buckets(0.0001, 2.0, 15).expect("valid buckets")),
        &["integration"]
    ).expect("metric creation failed");

    // =========================================================================
    // LOCATOR METRICS
    // =========================================================================

    /// Cross-frame object lookups by strategy and outcome
    pub static ref LOCATOR_LOOKUPS: CounterVec = CounterVec::new(
        Opts::new("sf_locator_lookups_total", "Cross-frame object lookups"),
        &["strategy", "outcome"]  // strategy: frame_scan/bus, outcome: found/not_found/failed
    ).expect("metric creation failed");

    /// Sibling frames skipped because they were cross-origin
    pub static ref LOCATOR_CROSS_ORIGIN_SKIPS: CounterVec = CounterVec::new(
        Opts::new("sf_locator_cross_origin_skips_total", "Sibling frames skipped during a scan"),
        &["strategy"]
    ).expect("metric creation failed");

    /// Sibling frames skipped because they were torn down mid-scan
    pub static ref LOCATOR_DETACHED_SKIPS: CounterVec = CounterVec::new(
        Opts::new("sf_locator_detached_skips_total", "Detached sibling frames skipped during a scan"),
        &["strategy"]
    ).expect("metric creation failed");
}

/// Handle over the registry the metrics were registered with.
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// Render every registered metric in the Prometheus text format.
    pub fn gather_text(&self) -> Result<String, TelemetryError> {
        encode(&self.registry)
    }
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error: the second call returns a handle over
/// the same registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Lifecycle
        Box::new(FRAMES_CREATED.clone()),
        Box::new(FRAMES_TORN_DOWN.clone()),
        Box::new(FRAMES_ACTIVE.clone()),
        Box::new(HANDSHAKES.clone()),
        Box::new(HANDSHAKE_DURATION.clone()),
        // Locator
        Box::new(LOCATOR_LOOKUPS.clone()),
        Box::new(LOCATOR_CROSS_ORIGIN_SKIPS.clone()),
        Box::new(LOCATOR_DETACHED_SKIPS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics of the global registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode(&REGISTRY)
}

fn encode(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: prometheus::Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &prometheus::Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
    ($histogram:expr, $labels:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram.with_label_values($labels))
    };
}
