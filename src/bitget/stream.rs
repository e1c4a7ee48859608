//! Bitget public ticker channel

use super::types::{ChannelArg, SnapshotResponse, SubscribeRequest, WsFrame, DEFAULT_WS_URL};
use crate::ticker::{Exchange, TickerFeed, TickerUpdate};
use crate::ws::{Backoff, WsClient, WsConfig, WsEvent};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Bitget drops connections that stay silent for longer than this
const TEXT_PING_INTERVAL: Duration = Duration::from_secs(30);

/// Streams ticker pushes for a set of symbols
pub struct BitgetTickerFeed {
    url: String,
    symbols: Vec<String>,
}

impl BitgetTickerFeed {
    /// Create a feed against the default endpoint
    pub fn new(symbols: Vec<String>) -> Self {
        Self::with_url(DEFAULT_WS_URL, symbols)
    }

    /// Create a feed against a specific endpoint
    pub fn with_url(url: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            url: url.into(),
            symbols: symbols.into_iter().map(|s| s.to_uppercase()).collect(),
        }
    }

    fn subscribe_message(&self) -> anyhow::Result<String> {
        let request = SubscribeRequest {
            op: "subscribe",
            args: self
                .symbols
                .iter()
                .map(|s| ChannelArg::spot_ticker(s))
                .collect(),
        };
        Ok(serde_json::to_string(&request)?)
    }

    fn to_updates(push: SnapshotResponse) -> Vec<TickerUpdate> {
        let received_at = Utc::now();
        push.data
            .into_iter()
            .filter_map(|data| {
                Some(TickerUpdate {
                    exchange: Exchange::Bitget,
                    exchange_ts: data.timestamp()?,
                    symbol: data.inst_id,
                    last_price: data.last,
                    open_price: data.open24h,
                    received_at,
                })
            })
            .collect()
    }

    async fn run_message_loop(
        mut ws_rx: mpsc::Receiver<WsEvent>,
        ws_tx: mpsc::Sender<String>,
        tick_tx: mpsc::Sender<TickerUpdate>,
        subscribe: String,
    ) {
        let start = tokio::time::Instant::now() + TEXT_PING_INTERVAL;
        let mut ping = tokio::time::interval_at(start, TEXT_PING_INTERVAL);
        ping.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut connected = false;

        loop {
            tokio::select! {
                msg = ws_rx.recv() => {
                    let Some(msg) = msg else { break };
                    match msg {
                        WsEvent::Connected => {
                            tracing::info!("Bitget ticker stream connected");
                            connected = true;
                            if ws_tx.send(subscribe.clone()).await.is_err() {
                                tracing::error!("Failed to send subscription message");
                                break;
                            }
                        }
                        WsEvent::Text(text) => match WsFrame::parse(&text) {
                            Some(WsFrame::Push(push)) => {
                                for update in Self::to_updates(push) {
                                    if tick_tx.send(update).await.is_err() {
                                        tracing::debug!("Ticker receiver dropped, stopping feed");
                                        return;
                                    }
                                }
                            }
                            Some(WsFrame::Event(event)) if event.event == "error" => {
                                tracing::error!(
                                    code = ?event.code,
                                    msg = ?event.msg,
                                    "Bitget subscription error"
                                );
                            }
                            Some(WsFrame::Event(event)) => {
                                tracing::debug!(event = %event.event, arg = ?event.arg, "Bitget event");
                            }
                            Some(WsFrame::Pong) => {}
                            None => tracing::trace!(frame = %text, "Ignoring frame"),
                        },
                        WsEvent::Reconnecting { attempt, delay } => {
                            connected = false;
                            tracing::warn!(attempt, ?delay, "Bitget ticker stream reconnecting");
                        }
                        WsEvent::Closed => {
                            tracing::warn!("Bitget ticker stream closed");
                            break;
                        }
                        WsEvent::Binary(_) => {}
                    }
                }

                _ = ping.tick() => {
                    if connected && ws_tx.send("ping".to_string()).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

#[async_trait]
impl TickerFeed for BitgetTickerFeed {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<TickerUpdate>> {
        if self.symbols.is_empty() {
            anyhow::bail!("No symbols to subscribe to");
        }

        let subscribe = self.subscribe_message()?;
        let (tick_tx, tick_rx) = mpsc::channel(1024);

        tracing::info!(symbols = ?self.symbols, "Subscribing to Bitget tickers");

        // Keepalive is the text ping sent by the message loop
        let config = WsConfig::new(&self.url)
            .backoff(Backoff::new(Duration::from_secs(1), Duration::from_secs(30)))
            .keepalive(None);
        let (ws_rx, ws_tx) = WsClient::new(config).connect_bidirectional();

        tokio::spawn(async move {
            Self::run_message_loop(ws_rx, ws_tx, tick_tx, subscribe).await;
        });

        Ok(tick_rx)
    }
}
