//! Bitget spot market data
//!
//! REST listings, tickers and candles from the v2 API, plus the v1 public
//! WebSocket ticker channel.

mod rest;
mod stream;
mod types;

pub use rest::BitgetClient;
pub use stream::BitgetTickerFeed;
pub use types::{
    Candle, ChannelArg, Granularity, SnapshotResponse, SubscribeResponse, Ticker, TickerData,
    TradingPair, DEFAULT_REST_URL, DEFAULT_WS_URL, MAX_CANDLE_LIMIT,
};
