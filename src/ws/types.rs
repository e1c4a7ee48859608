//! Stream connection settings and events

use std::time::Duration;
use thiserror::Error;

/// Reconnect delay that doubles after each failure, up to a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self { initial, max }
    }

    pub(crate) fn next(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(60))
    }
}

/// Settings for one ticker stream connection
#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    /// Give up after this many consecutive failed sessions (0 = never)
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Protocol ping period; `None` leaves keepalive to the caller
    pub keepalive: Option<Duration>,
}

impl WsConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_attempts: 0,
            backoff: Backoff::default(),
            keepalive: Some(Duration::from_secs(30)),
        }
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn keepalive(mut self, period: Option<Duration>) -> Self {
        self.keepalive = period;
        self
    }
}

/// What a stream connection reports to its consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    Text(String),
    Binary(Vec<u8>),
    /// A session is up; emitted again after every reconnect
    Connected,
    /// The last session failed; the next attempt starts after `delay`
    Reconnecting { attempt: u32, delay: Duration },
    /// No further events will follow
    Closed,
}

/// Stream connection failures
#[derive(Debug, Clone, Error)]
pub enum WsError {
    #[error("Could not connect: {0}")]
    Connect(String),
    #[error("Connection dropped: {0}")]
    Dropped(String),
    #[error("Server closed the stream")]
    ServerClosed,
    #[error("Write failed: {0}")]
    Send(String),
    #[error("No pong within one keepalive period")]
    KeepaliveTimeout,
    #[error("Gave up after {attempts} failed sessions")]
    GaveUp { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WsConfig::new("wss://stream.binance.com:9443/ws/btcusdt@miniTicker");
        assert_eq!(config.max_attempts, 0);
        assert_eq!(config.backoff, Backoff::default());
        assert_eq!(config.keepalive, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_builder() {
        let config = WsConfig::new("wss://ws.bitgetapi.com/spot/v1/stream")
            .max_attempts(3)
            .backoff(Backoff::new(Duration::from_millis(500), Duration::from_secs(30)))
            .keepalive(None);

        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff.initial, Duration::from_millis(500));
        assert!(config.keepalive.is_none());
    }

    #[test]
    fn test_backoff_doubles_to_ceiling() {
        let backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(5));
        assert_eq!(backoff.next(Duration::from_secs(1)), Duration::from_secs(2));
        assert_eq!(backoff.next(Duration::from_secs(4)), Duration::from_secs(5));
        assert_eq!(backoff.next(Duration::MAX), Duration::from_secs(5));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WsError::GaveUp { attempts: 4 }.to_string(),
            "Gave up after 4 failed sessions"
        );
        assert_eq!(
            WsError::Connect("refused".to_string()).to_string(),
            "Could not connect: refused"
        );
    }
}
