//! Configuration types for coin-panel

use crate::binance::{self, DEFAULT_SYMBOLS};
use crate::bitget;
use crate::format::SmallNumberStyle;
use crate::proxy::ProxySettings;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub binance: BinanceConfig,
    #[serde(default)]
    pub bitget: BitgetConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub proxy: ProxySettings,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Binance endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    #[serde(default = "default_binance_rest_url")]
    pub rest_url: String,
    #[serde(default = "default_binance_ws_url")]
    pub ws_url: String,
    /// Quote asset the 24h listing is filtered to
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
}

fn default_binance_rest_url() -> String {
    binance::DEFAULT_REST_URL.to_string()
}
fn default_binance_ws_url() -> String {
    binance::DEFAULT_WS_HOST.to_string()
}
fn default_quote_asset() -> String {
    "USDT".to_string()
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            rest_url: default_binance_rest_url(),
            ws_url: default_binance_ws_url(),
            quote_asset: default_quote_asset(),
        }
    }
}

/// Bitget endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BitgetConfig {
    #[serde(default = "default_bitget_rest_url")]
    pub rest_url: String,
    #[serde(default = "default_bitget_ws_url")]
    pub ws_url: String,
}

fn default_bitget_rest_url() -> String {
    bitget::DEFAULT_REST_URL.to_string()
}
fn default_bitget_ws_url() -> String {
    bitget::DEFAULT_WS_URL.to_string()
}

impl Default for BitgetConfig {
    fn default() -> Self {
        Self {
            rest_url: default_bitget_rest_url(),
            ws_url: default_bitget_ws_url(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Polling cadence
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Pause between queued REST requests (milliseconds)
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Seconds between board refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_request_delay_ms() -> u64 {
    300
}
fn default_refresh_interval_secs() -> u64 {
    30
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl PollConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Refresh interval, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// Board contents and rendering
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Symbols streamed by `watch` and priced by `prices`
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Maximum rows shown (0 = all)
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Rendering of prices below 0.001
    #[serde(default)]
    pub small_number_style: SmallNumberStyle,
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}
fn default_limit() -> usize {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            limit: default_limit(),
            small_number_style: SmallNumberStyle::default(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
