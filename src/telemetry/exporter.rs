//! Prometheus metrics and exporter

use metrics_exporter_prometheus::PrometheusBuilder;
use std::time::Duration;

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Rows currently on the board
    BoardRows,
    /// 1 when REST traffic goes through a proxy
    ProxyEnabled,
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::BoardRows => "coinpanel_board_rows",
            GaugeMetric::ProxyEnabled => "coinpanel_proxy_enabled",
        }
    }
}

/// Start the Prometheus scrape endpoint
pub fn install_exporter(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(port, "Prometheus exporter listening");
    Ok(())
}

/// Record one REST call
pub fn record_request(endpoint: &str, duration: Duration, ok: bool) {
    let endpoint = endpoint.to_string();

    metrics::counter!("coinpanel_rest_requests_total", "endpoint" => endpoint.clone())
        .increment(1);
    if !ok {
        metrics::counter!("coinpanel_rest_errors_total", "endpoint" => endpoint.clone())
            .increment(1);
    }
    metrics::histogram!("coinpanel_rest_latency_ms", "endpoint" => endpoint)
        .record(duration.as_secs_f64() * 1000.0);
}

/// Count one WebSocket frame
pub fn record_ws_message(url: &str) {
    metrics::counter!("coinpanel_ws_messages_total", "stream" => url.to_string()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(metric.name()).set(value);
}
