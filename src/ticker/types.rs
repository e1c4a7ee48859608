//! Ticker types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Bitget,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Binance => write!(f, "binance"),
            Exchange::Bitget => write!(f, "bitget"),
        }
    }
}

impl FromStr for Exchange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" => Ok(Exchange::Binance),
            "bitget" => Ok(Exchange::Bitget),
            other => anyhow::bail!("Unknown exchange: {}", other),
        }
    }
}

/// Price change of one symbol over 24h, optionally with short windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolChange {
    /// Trading symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Last traded price
    pub last_price: Decimal,
    /// Change over the 24h (or requested) window, in percent
    pub price_change_percent: Decimal,
    /// Change over the last 5 minutes, in percent
    pub m5_change_percent: Option<Decimal>,
    /// Change over the last 10 minutes, in percent
    pub m10_change_percent: Option<Decimal>,
}

impl SymbolChange {
    /// Create a row without short window data
    pub fn new(symbol: impl Into<String>, last_price: Decimal, price_change_percent: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            last_price,
            price_change_percent,
            m5_change_percent: None,
            m10_change_percent: None,
        }
    }
}

/// Latest price for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Decimal,
}

/// A streamed ticker update from either exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerUpdate {
    /// Source exchange
    pub exchange: Exchange,
    /// Trading symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Last price
    pub last_price: Decimal,
    /// Price 24h ago, when the exchange reports it
    pub open_price: Option<Decimal>,
    /// Exchange event time
    pub exchange_ts: DateTime<Utc>,
    /// Local time the update was received
    pub received_at: DateTime<Utc>,
}

impl TickerUpdate {
    /// Percent change from the open price to the last price
    pub fn change_percent(&self) -> Option<Decimal> {
        let open = self.open_price?;
        if open.is_zero() {
            return None;
        }
        Some(((self.last_price - open) / open * Decimal::ONE_HUNDRED).round_dp(2))
    }
}

/// Sort rows by 24h change, biggest gainers first
pub fn sort_by_change_desc(rows: &mut [SymbolChange]) {
    rows.sort_by(|a, b| b.price_change_percent.cmp(&a.price_change_percent));
}
