//! Binance REST client

use super::types::{
    paths, ExchangeInfo, RawTickerChange, RawTickerPrice, ServerTime, SymbolInfo, WindowSize,
    DEFAULT_REST_URL,
};
use crate::http::{get_json, ApiError, NO_QUERY};
use crate::ticker::{sort_by_change_desc, SymbolChange, TickerPrice};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;

/// Client for the public Binance spot REST API
#[derive(Debug, Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    quote_asset: String,
}

impl BinanceClient {
    /// Create a client against the default host
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_REST_URL)
    }

    /// Create a client against a specific host
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            quote_asset: "USDT".to_string(),
        }
    }

    /// Quote asset the 24h listing is filtered to
    pub fn quote_asset(mut self, quote: impl Into<String>) -> Self {
        self.quote_asset = quote.into().to_uppercase();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connectivity
    pub async fn ping(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.get(paths::PING, NO_QUERY).await?;
        Ok(())
    }

    /// Exchange server time
    pub async fn server_time(&self) -> Result<DateTime<Utc>, ApiError> {
        let time: ServerTime = self.get(paths::TIME, NO_QUERY).await?;
        Utc.timestamp_millis_opt(time.server_time)
            .single()
            .ok_or_else(|| ApiError::Exchange {
                code: "serverTime".to_string(),
                msg: format!("timestamp out of range: {}", time.server_time),
            })
    }

    /// All symbols listed on the exchange
    pub async fn exchange_symbols(&self) -> Result<Vec<SymbolInfo>, ApiError> {
        let info: ExchangeInfo = self.get(paths::EXCHANGE_INFO, NO_QUERY).await?;
        Ok(info.symbols)
    }

    /// 24h change for every pair quoted in the quote asset
    ///
    /// Leveraged tokens (`UP`/`DOWN`) are left out. Sorted by change,
    /// biggest gainers first.
    pub async fn hr24(&self) -> Result<Vec<SymbolChange>, ApiError> {
        let all: Vec<RawTickerChange> = self.get(paths::TICKER_24HR, NO_QUERY).await?;
        let total = all.len();

        let mut rows: Vec<SymbolChange> = all
            .into_iter()
            .filter(|t| is_listed_pair(&t.symbol, &self.quote_asset))
            .map(SymbolChange::from)
            .collect();
        sort_by_change_desc(&mut rows);

        tracing::debug!(total, kept = rows.len(), "Fetched 24h tickers");
        Ok(rows)
    }

    /// Latest price for each symbol
    pub async fn prices(&self, symbols: &[String]) -> Result<Vec<TickerPrice>, ApiError> {
        let query = [("symbols", symbols_param(symbols)?)];
        let raw: Vec<RawTickerPrice> = self.get(paths::TICKER_PRICE, &query).await?;
        Ok(raw.into_iter().map(TickerPrice::from).collect())
    }

    /// Price change over a rolling window, biggest gainers first
    pub async fn window_prices(
        &self,
        symbols: &[String],
        window: &WindowSize,
    ) -> Result<Vec<SymbolChange>, ApiError> {
        let query = [
            ("symbols", symbols_param(symbols)?),
            ("windowSize", window.to_string()),
        ];
        let raw: Vec<RawTickerChange> = self.get(paths::TICKER_WINDOW, &query).await?;

        let mut rows: Vec<SymbolChange> = raw.into_iter().map(SymbolChange::from).collect();
        sort_by_change_desc(&mut rows);
        Ok(rows)
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        get_json(&self.client, &self.base_url, path, query).await
    }
}

/// `symbols` query value: a JSON array of symbol names
fn symbols_param(symbols: &[String]) -> Result<String, ApiError> {
    Ok(serde_json::to_string(symbols)?)
}

fn is_listed_pair(symbol: &str, quote: &str) -> bool {
    symbol.ends_with(quote)
        && !symbol.ends_with(&format!("UP{}", quote))
        && !symbol.ends_with(&format!("DOWN{}", quote))
}
