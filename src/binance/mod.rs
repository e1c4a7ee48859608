//! Binance spot market data
//!
//! REST snapshots (24h change, latest price, rolling windows) and a
//! WebSocket mini-ticker stream.

mod rest;
mod stream;
mod types;

pub use rest::BinanceClient;
pub use stream::{combined_ws_url, ws_url, BinanceTickerFeed};
pub use types::{
    SymbolInfo, WindowSize, WindowSizeError, API_HOSTS, DEFAULT_REST_URL, DEFAULT_SYMBOLS,
    DEFAULT_WS_HOST, MAX_WINDOW_SYMBOLS,
};
