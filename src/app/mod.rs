//! Application context
//!
//! Owns the loaded configuration, the current proxy state and the shared
//! HTTP client. Commands receive it explicitly instead of reaching for
//! globals; a proxy change rebuilds the client in place.

use crate::binance::{BinanceClient, BinanceTickerFeed};
use crate::bitget::{BitgetClient, BitgetTickerFeed};
use crate::config::Config;
use crate::dashboard::Board;
use crate::format::MagnitudeFormatter;
use crate::http::build_client;
use crate::proxy::{check_reachable, ProxyCommand, ProxySettings};
use crate::schedule::RequestQueue;
use crate::telemetry::{set_gauge, GaugeMetric};
use crate::ticker::{Exchange, TickerFeed};
use reqwest::Client;

/// Shared state handed to every command
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Config,
    proxy: ProxySettings,
    client: Client,
    formatter: MagnitudeFormatter,
}

impl AppContext {
    /// Build the context from loaded configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let proxy = config.proxy.clone();
        let client = build_client(config.http.timeout(), &proxy)?;
        let formatter =
            MagnitudeFormatter::new().small_style(config.dashboard.small_number_style);

        set_gauge(GaugeMetric::ProxyEnabled, proxy_gauge(&proxy));

        Ok(Self {
            config,
            proxy,
            client,
            formatter,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Proxy settings currently in effect
    pub fn proxy(&self) -> &ProxySettings {
        &self.proxy
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn formatter(&self) -> &MagnitudeFormatter {
        &self.formatter
    }

    /// Open or close the proxy
    ///
    /// Opening probes the check URL through the new proxy first. On any
    /// failure the previous settings and client stay in place.
    pub async fn set_proxy(&mut self, command: ProxyCommand) -> anyhow::Result<()> {
        let mut proxy = self.proxy.clone();
        proxy.apply_command(&command)?;
        let client = build_client(self.config.http.timeout(), &proxy)?;

        match &command {
            ProxyCommand::Open(url) => {
                check_reachable(&client, &proxy.check_url).await?;
                tracing::info!(proxy = %url, "Proxy enabled");
            }
            ProxyCommand::Close => tracing::info!("Proxy disabled"),
        }

        set_gauge(GaugeMetric::ProxyEnabled, proxy_gauge(&proxy));
        self.proxy = proxy;
        self.client = client;
        Ok(())
    }

    /// Binance REST client on the shared HTTP client
    pub fn binance(&self) -> BinanceClient {
        BinanceClient::with_base_url(self.client.clone(), &self.config.binance.rest_url)
            .quote_asset(&self.config.binance.quote_asset)
    }

    /// Bitget REST client on the shared HTTP client
    pub fn bitget(&self) -> BitgetClient {
        BitgetClient::with_base_url(self.client.clone(), &self.config.bitget.rest_url)
    }

    /// Ticker stream for `symbols` on the given exchange
    pub fn feed(&self, exchange: Exchange, symbols: Vec<String>) -> Box<dyn TickerFeed> {
        match exchange {
            Exchange::Binance => Box::new(BinanceTickerFeed::with_host(
                &self.config.binance.ws_url,
                symbols,
            )),
            Exchange::Bitget => Box::new(BitgetTickerFeed::with_url(
                &self.config.bitget.ws_url,
                symbols,
            )),
        }
    }

    /// Queue pacing REST calls by the configured delay
    pub fn queue(&self) -> RequestQueue {
        RequestQueue::new(self.config.poll.request_delay())
    }

    /// Empty board sized by the dashboard settings
    pub fn board(&self) -> Board {
        Board::new(self.config.dashboard.limit)
    }
}

fn proxy_gauge(proxy: &ProxySettings) -> f64 {
    if proxy.active_url().is_some() {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SmallNumberStyle;
    use crate::proxy::ProxyError;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context() -> AppContext {
        AppContext::new(Config::default()).unwrap()
    }

    /// In-memory log sink for a test subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn capture(&self) -> tracing::subscriber::DefaultGuard {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_new_from_defaults() {
        let ctx = context();
        assert!(!ctx.proxy().enabled);
        assert_eq!(ctx.queue().delay(), Duration::from_millis(300));
        assert_eq!(ctx.binance().base_url(), crate::binance::DEFAULT_REST_URL);
        assert_eq!(ctx.formatter(), &MagnitudeFormatter::default());
    }

    #[test]
    fn test_formatter_follows_config() {
        let mut config = Config::default();
        config.dashboard.small_number_style = SmallNumberStyle::Scientific;
        let ctx = AppContext::new(config).unwrap();
        assert_eq!(ctx.formatter().format(Some(0.00012345)), "1.23e-4");
    }

    #[test]
    fn test_board_uses_limit() {
        let mut config = Config::default();
        config.dashboard.limit = 1;
        let ctx = AppContext::new(config).unwrap();

        let mut board = ctx.board();
        board.load_snapshot(vec![
            crate::ticker::SymbolChange::new("BTCUSDT", 1.into(), 1.into()),
            crate::ticker::SymbolChange::new("ETHUSDT", 1.into(), 2.into()),
        ]);
        assert_eq!(board.symbols(), vec!["ETHUSDT"]);
    }

    #[tokio::test]
    async fn test_set_proxy_invalid_url_keeps_state() {
        let mut ctx = context();
        let err = ctx
            .set_proxy(ProxyCommand::Open("not a proxy".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProxyError>(),
            Some(ProxyError::InvalidUrl { .. })
        ));
        assert!(!ctx.proxy().enabled);
    }

    #[tokio::test]
    async fn test_set_proxy_unreachable_keeps_state() {
        let mut ctx = context();
        let result = ctx
            .set_proxy(ProxyCommand::Open("http://127.0.0.1:1".to_string()))
            .await;

        assert!(result.is_err());
        assert_eq!(ctx.proxy().active_url(), None);
    }

    #[tokio::test]
    async fn test_unreachable_proxy_not_logged_as_enabled() {
        let logs = LogBuffer::default();
        let _guard = logs.capture();

        let mut ctx = context();
        let result = ctx
            .set_proxy(ProxyCommand::Open("http://127.0.0.1:1".to_string()))
            .await;

        assert!(result.is_err());
        assert!(!logs.contents().contains("Proxy enabled"), "{}", logs.contents());
    }

    #[tokio::test]
    async fn test_reachable_proxy_logged_once_committed() {
        // The mock answers the proxied HEAD for any target
        let proxy = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&proxy)
            .await;

        let mut config = Config::default();
        config.proxy.check_url = "http://check.invalid/".to_string();
        let mut ctx = AppContext::new(config).unwrap();

        let logs = LogBuffer::default();
        let _guard = logs.capture();
        ctx.set_proxy(ProxyCommand::Open(proxy.uri())).await.unwrap();

        assert_eq!(ctx.proxy().active_url(), Some(proxy.uri().as_str()));
        assert_eq!(logs.contents().matches("Proxy enabled").count(), 1);
    }

    #[tokio::test]
    async fn test_set_proxy_close() {
        let mut config = Config::default();
        config.proxy = ProxySettings::enabled("http://127.0.0.1:7890");
        let mut ctx = AppContext::new(config).unwrap();
        assert!(ctx.proxy().enabled);

        ctx.set_proxy(ProxyCommand::Close).await.unwrap();
        assert!(!ctx.proxy().enabled);
        assert_eq!(ctx.proxy().url, None);
    }
}
