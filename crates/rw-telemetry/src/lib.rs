//! # Reserve-Watch Telemetry
//!
//! Logging and metrics shared by the monitor runtime.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters, gauges and histograms in one registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rw_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RW_SERVICE_NAME` | `reserve-watch` | Service name in logs |
//! | `RW_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `RW_JSON_LOGS` | `true` in containers | JSON log lines |
//! | `RW_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    gather_metrics, record_finding, register_metrics, set_chain_head, PassOutcome, PassTimer,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    init_logging(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Span for one monitor pass.
///
/// ```rust,ignore
/// let _span = rw_telemetry::monitor_span!("stale-price", block = 19_000_000).entered();
/// ```
#[macro_export]
macro_rules! monitor_span {
    ($monitor:expr $(, $($field:tt)*)?) => {
        tracing::info_span!("monitor_pass", monitor = $monitor $(, $($field)*)?)
    };
}
