//! Binance WebSocket mini-ticker feed

use super::types::{StreamFrame, DEFAULT_WS_HOST};
use crate::ticker::{Exchange, TickerFeed, TickerUpdate};
use crate::ws::{Backoff, WsClient, WsConfig, WsEvent};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::time::Duration;
use tokio::sync::mpsc;

/// URL of a single raw stream, e.g. `btcusdt@miniTicker`
pub fn ws_url(host: &str, key: &str) -> String {
    format!("{}/ws/{}", host, key)
}

/// URL of a combined stream carrying several keys
pub fn combined_ws_url(host: &str, keys: &[String]) -> String {
    format!("{}/stream?streams={}", host, keys.join("/"))
}

/// Streams 24h mini tickers for a set of symbols
pub struct BinanceTickerFeed {
    host: String,
    symbols: Vec<String>,
}

impl BinanceTickerFeed {
    /// Create a feed against the default stream host
    pub fn new(symbols: Vec<String>) -> Self {
        Self::with_host(DEFAULT_WS_HOST, symbols)
    }

    /// Create a feed against a specific stream host
    pub fn with_host(host: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            symbols: symbols.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    fn stream_keys(&self) -> Vec<String> {
        self.symbols
            .iter()
            .map(|s| format!("{}@miniTicker", s))
            .collect()
    }

    /// Build the WebSocket URL; one symbol uses the raw endpoint
    fn build_ws_url(&self) -> String {
        let keys = self.stream_keys();
        match keys.as_slice() {
            [single] => ws_url(&self.host, single),
            _ => combined_ws_url(&self.host, &keys),
        }
    }

    /// Parse a mini ticker frame into an update
    fn parse_message(msg: &str) -> Option<TickerUpdate> {
        let ticker = serde_json::from_str::<StreamFrame>(msg).ok()?.into_ticker();

        if ticker.event_type != "24hrMiniTicker" {
            return None;
        }

        let exchange_ts = Utc.timestamp_millis_opt(ticker.event_time).single()?;

        Some(TickerUpdate {
            exchange: Exchange::Binance,
            symbol: ticker.symbol,
            last_price: ticker.close,
            open_price: Some(ticker.open),
            exchange_ts,
            received_at: Utc::now(),
        })
    }

    async fn run_message_loop(
        mut ws_rx: mpsc::Receiver<WsEvent>,
        tick_tx: mpsc::Sender<TickerUpdate>,
    ) {
        while let Some(msg) = ws_rx.recv().await {
            match msg {
                WsEvent::Text(text) => match Self::parse_message(&text) {
                    Some(update) => {
                        if tick_tx.send(update).await.is_err() {
                            tracing::debug!("Ticker receiver dropped, stopping feed");
                            break;
                        }
                    }
                    None => tracing::trace!(frame = %text, "Ignoring frame"),
                },
                WsEvent::Connected => {
                    tracing::info!("Binance ticker stream connected");
                }
                WsEvent::Closed => {
                    tracing::warn!("Binance ticker stream closed");
                    break;
                }
                WsEvent::Reconnecting { attempt, delay } => {
                    tracing::warn!(attempt, ?delay, "Binance ticker stream reconnecting");
                }
                WsEvent::Binary(_) => {}
            }
        }
    }
}

#[async_trait]
impl TickerFeed for BinanceTickerFeed {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<TickerUpdate>> {
        if self.symbols.is_empty() {
            anyhow::bail!("No symbols to subscribe to");
        }

        let (tick_tx, tick_rx) = mpsc::channel(1024);
        let url = self.build_ws_url();

        tracing::info!(symbols = ?self.symbols, "Subscribing to Binance mini tickers");

        let config = WsConfig::new(url)
            .backoff(Backoff::new(Duration::from_secs(1), Duration::from_secs(60)))
            .keepalive(Some(Duration::from_secs(30)));

        let ws_rx = WsClient::new(config).connect();

        tokio::spawn(async move {
            Self::run_message_loop(ws_rx, tick_tx).await;
        });

        Ok(tick_rx)
    }
}
