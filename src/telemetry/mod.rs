//! Telemetry module
//!
//! Structured logging and Prometheus metrics

mod exporter;
mod logging;

pub use exporter::{install_exporter, record_request, record_ws_message, set_gauge, GaugeMetric};
pub use logging::{init_logging, LogFormat};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        install_exporter(port)?;
    }

    Ok(())
}
