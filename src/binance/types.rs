//! Binance wire types and constants

use crate::ticker::{SymbolChange, TickerPrice};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// REST hosts; all serve the same API
pub const API_HOSTS: [&str; 5] = [
    "https://api.binance.com",
    "https://api1.binance.com",
    "https://api2.binance.com",
    "https://api3.binance.com",
    "https://api4.binance.com",
];

/// REST host used unless configured otherwise
pub const DEFAULT_REST_URL: &str = API_HOSTS[4];

/// WebSocket stream host
pub const DEFAULT_WS_HOST: &str = "wss://stream.binance.com:9443";

/// Symbols shown when none are configured
pub const DEFAULT_SYMBOLS: [&str; 4] = ["BTCUSDT", "ETHUSDT", "BNBUSDT", "OGUSDT"];

/// Most symbols a single rolling window request accepts
pub const MAX_WINDOW_SYMBOLS: usize = 100;

pub(crate) mod paths {
    pub const PING: &str = "/api/v3/ping";
    pub const TIME: &str = "/api/v3/time";
    pub const EXCHANGE_INFO: &str = "/api/v3/exchangeInfo";
    pub const TICKER_24HR: &str = "/api/v3/ticker/24hr";
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    pub const TICKER_WINDOW: &str = "/api/v3/ticker";
}

/// Invalid rolling window size
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid window size {0:?}: expected 1m-59m, 1h-23h or 1d-7d")]
pub struct WindowSizeError(pub String);

/// Rolling window for `/api/v3/ticker`, e.g. `5m`, `4h`, `1d`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowSize(String);

impl WindowSize {
    /// Window of `n` minutes
    pub fn minutes(n: u32) -> Result<Self, WindowSizeError> {
        format!("{}m", n).parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize("5m".to_string())
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WindowSize {
    type Err = WindowSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowSizeError(s.to_string());

        let (split, _) = s.char_indices().last().ok_or_else(invalid)?;
        let (count, unit) = s.split_at(split);
        if count.is_empty() || !count.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u32 = count.parse().map_err(|_| invalid())?;

        let max = match unit {
            "m" => 59,
            "h" => 23,
            "d" => 7,
            _ => return Err(invalid()),
        };
        if count == 0 || count > max {
            return Err(invalid());
        }

        Ok(WindowSize(format!("{}{}", count, unit)))
    }
}

/// Symbol metadata from `exchangeInfo`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
}

impl SymbolInfo {
    /// Whether the pair is currently tradable
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServerTime {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

/// Row of `/api/v3/ticker/24hr` or `/api/v3/ticker`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTickerChange {
    pub symbol: String,
    pub last_price: Decimal,
    pub price_change_percent: Decimal,
}

impl From<RawTickerChange> for SymbolChange {
    fn from(raw: RawTickerChange) -> Self {
        SymbolChange::new(raw.symbol, raw.last_price, raw.price_change_percent)
    }
}

/// Row of `/api/v3/ticker/price`
#[derive(Debug, Deserialize)]
pub(crate) struct RawTickerPrice {
    pub symbol: String,
    pub price: Decimal,
}

impl From<RawTickerPrice> for TickerPrice {
    fn from(raw: RawTickerPrice) -> Self {
        TickerPrice {
            symbol: raw.symbol,
            price: raw.price,
        }
    }
}

/// `<symbol>@miniTicker` payload
#[derive(Debug, Deserialize)]
pub(crate) struct MiniTicker {
    /// Event type
    #[serde(rename = "e")]
    pub event_type: String,
    /// Event time (milliseconds)
    #[serde(rename = "E")]
    pub event_time: i64,
    /// Symbol
    #[serde(rename = "s")]
    pub symbol: String,
    /// Close (last) price
    #[serde(rename = "c")]
    pub close: Decimal,
    /// Open price 24h ago
    #[serde(rename = "o")]
    pub open: Decimal,
}

/// Frame on either a raw (`/ws/`) or combined (`/stream?streams=`) stream
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StreamFrame {
    Combined {
        #[allow(dead_code)]
        stream: String,
        data: MiniTicker,
    },
    Raw(MiniTicker),
}

impl StreamFrame {
    pub fn into_ticker(self) -> MiniTicker {
        match self {
            StreamFrame::Combined { data, .. } => data,
            StreamFrame::Raw(ticker) => ticker,
        }
    }
}
