//! Supervised stream connection

use super::types::{WsConfig, WsError, WsEvent};
use crate::telemetry;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const EVENT_BUFFER: usize = 1024;
const OUTGOING_BUFFER: usize = 64;

/// Handle that spawns a supervised connection per call
pub struct WsClient {
    config: WsConfig,
}

impl WsClient {
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Start streaming; the task stops once the receiver is dropped
    pub fn connect(&self) -> mpsc::Receiver<WsEvent> {
        self.spawn(None)
    }

    /// Start streaming and accept outgoing text frames
    ///
    /// Frames queued while disconnected are written after the next connect.
    /// Subscriptions must be re-sent on every [`WsEvent::Connected`].
    pub fn connect_bidirectional(&self) -> (mpsc::Receiver<WsEvent>, mpsc::Sender<String>) {
        let (out_tx, out_rx) = mpsc::channel(OUTGOING_BUFFER);
        (self.spawn(Some(out_rx)), out_tx)
    }

    fn spawn(&self, outgoing: Option<mpsc::Receiver<String>>) -> mpsc::Receiver<WsEvent> {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let config = self.config.clone();

        tokio::spawn(async move {
            if let Err(e) = supervise(config, events_tx, outgoing).await {
                tracing::error!(error = %e, "Stream supervisor stopped");
            }
        });

        events_rx
    }
}

enum SessionEnd {
    /// The consumer went away
    Finished,
    /// Anything else, a server close frame included, ends in a reconnect
    Failed { error: WsError, connected: bool },
}

async fn supervise(
    config: WsConfig,
    events: mpsc::Sender<WsEvent>,
    mut outgoing: Option<mpsc::Receiver<String>>,
) -> Result<(), WsError> {
    let mut failures = 0u32;
    let mut delay = config.backoff.initial;

    loop {
        match session(&config, &events, outgoing.as_mut()).await {
            SessionEnd::Finished => {
                tracing::info!(url = %config.url, "Stream closed");
                let _ = events.send(WsEvent::Closed).await;
                return Ok(());
            }
            SessionEnd::Failed { error, connected } => {
                // A session that got as far as connecting resets the backoff
                if connected {
                    failures = 0;
                    delay = config.backoff.initial;
                }
                failures += 1;
                tracing::warn!(url = %config.url, error = %error, failures, "Stream session failed");

                if config.max_attempts > 0 && failures >= config.max_attempts {
                    let _ = events.send(WsEvent::Closed).await;
                    return Err(WsError::GaveUp { attempts: failures });
                }
                if events.is_closed() {
                    return Ok(());
                }

                let _ = events
                    .send(WsEvent::Reconnecting {
                        attempt: failures,
                        delay,
                    })
                    .await;
                sleep(delay).await;
                delay = config.backoff.next(delay);
            }
        }
    }
}

async fn session(
    config: &WsConfig,
    events: &mpsc::Sender<WsEvent>,
    outgoing: Option<&mut mpsc::Receiver<String>>,
) -> SessionEnd {
    tracing::info!(url = %config.url, "Connecting stream");
    let stream = match connect_async(config.url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            return SessionEnd::Failed {
                error: WsError::Connect(e.to_string()),
                connected: false,
            }
        }
    };

    match pump(config, events, outgoing, stream).await {
        Ok(()) => SessionEnd::Finished,
        Err(error) => SessionEnd::Failed {
            error,
            connected: true,
        },
    }
}

fn keepalive_timer(config: &WsConfig) -> Option<Interval> {
    config.keepalive.map(|period| {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        timer
    })
}

/// Move frames both ways until the session ends
///
/// `Ok` means the event receiver or the outgoing sender was dropped.
async fn pump(
    config: &WsConfig,
    events: &mpsc::Sender<WsEvent>,
    mut outgoing: Option<&mut mpsc::Receiver<String>>,
    stream: Stream,
) -> Result<(), WsError> {
    let (mut sink, mut frames) = stream.split();
    tracing::info!(url = %config.url, "Stream connected");

    if events.send(WsEvent::Connected).await.is_err() {
        return Ok(());
    }

    let mut keepalive = keepalive_timer(config);
    let mut awaiting_pong = false;

    loop {
        tokio::select! {
            frame = frames.next() => {
                let frame = match frame {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => return Err(WsError::Dropped(e.to_string())),
                    None => return Err(WsError::Dropped("stream ended".to_string())),
                };
                let event = match frame {
                    Message::Text(text) => WsEvent::Text(text),
                    Message::Binary(data) => WsEvent::Binary(data),
                    Message::Ping(payload) => {
                        sink.send(Message::Pong(payload))
                            .await
                            .map_err(|e| WsError::Send(e.to_string()))?;
                        continue;
                    }
                    Message::Pong(_) => {
                        awaiting_pong = false;
                        continue;
                    }
                    Message::Close(reason) => {
                        tracing::info!(url = %config.url, ?reason, "Close frame received");
                        return Err(WsError::ServerClosed);
                    }
                    Message::Frame(_) => continue,
                };

                telemetry::record_ws_message(&config.url);
                if events.send(event).await.is_err() {
                    return Ok(());
                }
            }

            text = async {
                match outgoing.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                let Some(text) = text else { return Ok(()) };
                sink.send(Message::Text(text))
                    .await
                    .map_err(|e| WsError::Send(e.to_string()))?;
            }

            _ = async {
                match keepalive.as_mut() {
                    Some(timer) => {
                        timer.tick().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            } => {
                if awaiting_pong {
                    return Err(WsError::KeepaliveTimeout);
                }
                sink.send(Message::Ping(Vec::new()))
                    .await
                    .map_err(|e| WsError::Send(e.to_string()))?;
                awaiting_pong = true;
            }
        }
    }
}
