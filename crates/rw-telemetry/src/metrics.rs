//! Prometheus metrics for Reserve-Watch monitors.
//!
//! All metrics follow the naming convention: `rw_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: findings emitted, monitor passes by outcome
//! - **Gauge**: last processed chain head
//! - **Histogram**: monitor pass duration

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Findings emitted, by alert id
    pub static ref FINDINGS_EMITTED: CounterVec = CounterVec::new(
        Opts::new("rw_findings_emitted_total", "Total findings emitted by all monitors"),
        &["alert_id"]
    ).expect("metric creation failed");

    /// Monitor passes
    pub static ref MONITOR_PASSES: CounterVec = CounterVec::new(
        Opts::new("rw_monitor_passes_total", "Total monitor passes"),
        &["monitor", "outcome"]  // outcome: ok/error
    ).expect("metric creation failed");

    /// Monitor pass duration
    pub static ref MONITOR_PASS_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "rw_monitor_pass_duration_seconds",
            "Time spent in one monitor pass"
        ).buckets(exponential_buckets(0.005, 2.0, 12).expect("valid buckets")),
        &["monitor"]
    ).expect("metric creation failed");

    /// Last block handed to the monitors
    pub static ref CHAIN_HEAD_BLOCK: Gauge = Gauge::new(
        "rw_chain_head_block",
        "Number of the last block processed"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling it more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(FINDINGS_EMITTED.clone()),
        Box::new(MONITOR_PASSES.clone()),
        Box::new(MONITOR_PASS_DURATION.clone()),
        Box::new(CHAIN_HEAD_BLOCK.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one emitted finding.
pub fn record_finding(alert_id: &str) {
    FINDINGS_EMITTED.with_label_values(&[alert_id]).inc();
}

/// Record the block currently being processed.
pub fn set_chain_head(block: u64) {
    CHAIN_HEAD_BLOCK.set(block as f64);
}

/// Outcome of one monitor pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass returned (possibly zero) findings.
    Ok,
    /// The pass failed.
    Error,
}

impl PassOutcome {
    fn label(self) -> &'static str {
        match self {
            PassOutcome::Ok => "ok",
            PassOutcome::Error => "error",
        }
    }
}

/// Timer for one monitor pass.
pub struct PassTimer {
    monitor: &'static str,
    start: std::time::Instant,
}

impl PassTimer {
    /// Start timing a pass of `monitor`.
    pub fn start(monitor: &'static str) -> Self {
        Self {
            monitor,
            start: std::time::Instant::now(),
        }
    }

    /// Observe the duration and count the pass.
    pub fn finish(self, outcome: PassOutcome) {
        let duration = self.start.elapsed().as_secs_f64();
        MONITOR_PASS_DURATION
            .with_label_values(&[self.monitor])
            .observe(duration);
        MONITOR_PASSES
            .with_label_values(&[self.monitor, outcome.label()])
            .inc();
    }
}
