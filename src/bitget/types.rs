//! Bitget wire types and constants

use crate::http::ApiError;
use crate::ticker::SymbolChange;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// REST host
pub const DEFAULT_REST_URL: &str = "https://api.bitget.com";

/// Public spot WebSocket endpoint
pub const DEFAULT_WS_URL: &str = "wss://ws.bitgetapi.com/spot/v1/stream";

/// Most candles one history request returns
pub const MAX_CANDLE_LIMIT: u32 = 200;

const SUCCESS_CODE: &str = "00000";

pub(crate) mod paths {
    pub const ALL_PAIRS: &str = "/api/v2/spot/public/symbols";
    pub const HISTORY_CANDLES: &str = "/api/v2/spot/market/history-candles";
    pub const TICKERS: &str = "/api/v2/spot/market/tickers";
}

/// Response envelope shared by all v2 REST endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    pub code: String,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning non-success codes into errors
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.code != SUCCESS_CODE {
            return Err(ApiError::Exchange {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or(ApiError::Exchange {
            code: self.code,
            msg: "response has no data".to_string(),
        })
    }
}

/// Millisecond timestamps arrive as either strings or numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Number(i64),
    Text(String),
}

impl Millis {
    fn value<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Millis::Number(n) => Ok(n),
            Millis::Text(s) => s.parse().map_err(E::custom),
        }
    }
}

fn de_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Millis::deserialize(deserializer)?.value()
}

fn de_opt_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<Millis>::deserialize(deserializer)?
        .map(Millis::value)
        .transpose()
}

fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Spot trading pair metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub symbol: String,
    pub base_coin: String,
    pub quote_coin: String,
    #[serde(default)]
    pub min_trade_amount: Decimal,
    #[serde(default)]
    pub max_trade_amount: Decimal,
    #[serde(default)]
    pub taker_fee_rate: Decimal,
    #[serde(default)]
    pub maker_fee_rate: Decimal,
    #[serde(default)]
    pub price_precision: String,
    #[serde(default)]
    pub quantity_precision: String,
    #[serde(default)]
    pub quote_precision: String,
    pub status: String,
    #[serde(rename = "minTradeUSDT", default)]
    pub min_trade_usdt: Decimal,
    #[serde(default)]
    pub buy_limit_price_ratio: Decimal,
    #[serde(default)]
    pub sell_limit_price_ratio: Decimal,
}

impl TradingPair {
    /// Whether the pair is open for trading
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }

    /// Decimal places of the price tick
    pub fn price_decimals(&self) -> Option<u32> {
        self.price_precision.parse().ok()
    }
}

/// Spot ticker from `/api/v2/spot/market/tickers`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    pub high24h: Decimal,
    pub open: Decimal,
    pub low24h: Decimal,
    pub last_pr: Decimal,
    pub quote_volume: Decimal,
    pub base_volume: Decimal,
    #[serde(default)]
    pub usdt_volume: Decimal,
    #[serde(default)]
    pub bid_pr: Option<Decimal>,
    #[serde(default)]
    pub ask_pr: Option<Decimal>,
    #[serde(default)]
    pub bid_sz: Option<Decimal>,
    #[serde(default)]
    pub ask_sz: Option<Decimal>,
    #[serde(default)]
    pub open_utc: Option<Decimal>,
    #[serde(deserialize_with = "de_millis")]
    pub ts: i64,
    #[serde(default)]
    pub change_utc24h: Option<Decimal>,
    /// 24h change as a ratio (`0.0123` = 1.23 %)
    pub change24h: Decimal,
}

impl Ticker {
    /// Exchange timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.ts)
    }

    /// Normalize into a table row
    pub fn to_symbol_change(&self) -> SymbolChange {
        let percent = (self.change24h * Decimal::ONE_HUNDRED).round_dp(2);
        SymbolChange::new(self.symbol.clone(), self.last_pr, percent)
    }
}

/// Candle interval for history requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    OneMin,
    FiveMin,
    FifteenMin,
    ThirtyMin,
    OneHour,
    FourHour,
    TwelveHour,
    OneDay,
    OneWeek,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::OneMin => "1min",
            Granularity::FiveMin => "5min",
            Granularity::FifteenMin => "15min",
            Granularity::ThirtyMin => "30min",
            Granularity::OneHour => "1h",
            Granularity::FourHour => "4h",
            Granularity::TwelveHour => "12h",
            Granularity::OneDay => "1day",
            Granularity::OneWeek => "1week",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1min" => Granularity::OneMin,
            "5min" => Granularity::FiveMin,
            "15min" => Granularity::FifteenMin,
            "30min" => Granularity::ThirtyMin,
            "1h" => Granularity::OneHour,
            "4h" => Granularity::FourHour,
            "12h" => Granularity::TwelveHour,
            "1day" => Granularity::OneDay,
            "1week" => Granularity::OneWeek,
            other => anyhow::bail!("Unknown granularity: {}", other),
        })
    }
}

/// One OHLCV candle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub base_volume: Decimal,
    pub usdt_volume: Decimal,
    pub quote_volume: Decimal,
}

impl Candle {
    /// Parse a `[ts, open, high, low, close, baseVol, usdtVol, quoteVol]` row
    ///
    /// Fields may be strings or numbers; missing volume fields are zero.
    pub(crate) fn from_row(row: &[serde_json::Value]) -> Result<Self, ApiError> {
        let bad_row = || ApiError::Exchange {
            code: "candle".to_string(),
            msg: format!("malformed candle row: {:?}", row),
        };

        if row.len() < 5 {
            return Err(bad_row());
        }

        let field = |i: usize| -> Result<Decimal, ApiError> {
            match row.get(i) {
                Some(value) => value_to_decimal(value).ok_or_else(bad_row),
                None => Ok(Decimal::ZERO),
            }
        };

        let ts = value_to_decimal(&row[0])
            .and_then(|d| d.to_i64())
            .and_then(millis_to_utc)
            .ok_or_else(bad_row)?;

        Ok(Candle {
            open_time: ts,
            open: field(1)?,
            high: field(2)?,
            low: field(3)?,
            close: field(4)?,
            base_volume: field(5)?,
            usdt_volume: field(6)?,
            quote_volume: field(7)?,
        })
    }
}

fn value_to_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Channel address used in subscribe requests and pushes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelArg {
    pub inst_type: String,
    pub channel: String,
    pub inst_id: String,
}

impl ChannelArg {
    /// Public spot ticker channel for a symbol
    pub fn spot_ticker(symbol: &str) -> Self {
        Self {
            inst_type: "SP".to_string(),
            channel: "ticker".to_string(),
            inst_id: symbol.to_uppercase(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscribeRequest {
    pub op: &'static str,
    pub args: Vec<ChannelArg>,
}

/// Subscribe acknowledgement or error event
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeResponse {
    pub event: String,
    #[serde(default)]
    pub arg: Option<ChannelArg>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Ticker entry in a channel push
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerData {
    pub inst_id: String,
    pub last: Decimal,
    #[serde(default)]
    pub open24h: Option<Decimal>,
    #[serde(default)]
    pub high24h: Option<Decimal>,
    #[serde(default)]
    pub low24h: Option<Decimal>,
    #[serde(default)]
    pub best_bid: Option<Decimal>,
    #[serde(default)]
    pub best_ask: Option<Decimal>,
    #[serde(default)]
    pub base_volume: Option<Decimal>,
    #[serde(default)]
    pub quote_volume: Option<Decimal>,
    #[serde(deserialize_with = "de_millis")]
    pub ts: i64,
}

impl TickerData {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.ts)
    }
}

/// Snapshot or update push on a subscribed channel
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub action: String,
    pub arg: ChannelArg,
    pub data: Vec<TickerData>,
    #[serde(default, deserialize_with = "de_opt_millis")]
    pub ts: Option<i64>,
}

/// Any text frame on the public stream
#[derive(Debug, Clone)]
pub(crate) enum WsFrame {
    Pong,
    Push(SnapshotResponse),
    Event(SubscribeResponse),
}

impl WsFrame {
    pub fn parse(text: &str) -> Option<Self> {
        if text == "pong" {
            return Some(WsFrame::Pong);
        }
        if let Ok(push) = serde_json::from_str::<SnapshotResponse>(text) {
            return Some(WsFrame::Push(push));
        }
        serde_json::from_str::<SubscribeResponse>(text)
            .ok()
            .map(WsFrame::Event)
    }
}
