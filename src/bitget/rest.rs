//! Bitget REST client

use super::types::{
    paths, Candle, Envelope, Granularity, Ticker, TradingPair, DEFAULT_REST_URL, MAX_CANDLE_LIMIT,
};
use crate::http::{get_json, ApiError, NO_QUERY};
use crate::ticker::{sort_by_change_desc, SymbolChange};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the public Bitget spot REST API
#[derive(Debug, Clone)]
pub struct BitgetClient {
    client: Client,
    base_url: String,
}

impl BitgetClient {
    /// Create a client against the default host
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_REST_URL)
    }

    /// Create a client against a specific host
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// All spot trading pairs
    pub async fn trading_pairs(&self) -> Result<Vec<TradingPair>, ApiError> {
        self.get(paths::ALL_PAIRS, NO_QUERY).await
    }

    /// Candles ending at `end_time`, newest last
    ///
    /// `limit` is capped at 200.
    pub async fn history_candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        end_time: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Candle>, ApiError> {
        let query = [
            ("symbol", symbol.to_uppercase()),
            ("granularity", granularity.to_string()),
            ("endTime", end_time.timestamp_millis().to_string()),
            ("limit", limit.clamp(1, MAX_CANDLE_LIMIT).to_string()),
        ];
        let rows: Vec<Vec<serde_json::Value>> = self.get(paths::HISTORY_CANDLES, &query).await?;

        let mut candles = rows
            .iter()
            .map(|row| Candle::from_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.open_time);
        Ok(candles)
    }

    /// Tickers for one symbol, or for every symbol when `None`
    pub async fn tickers(&self, symbol: Option<&str>) -> Result<Vec<Ticker>, ApiError> {
        match symbol {
            Some(symbol) => {
                self.get(paths::TICKERS, &[("symbol", symbol.to_uppercase())])
                    .await
            }
            None => self.get(paths::TICKERS, NO_QUERY).await,
        }
    }

    /// 24h change for every pair quoted in `quote`, biggest gainers first
    pub async fn symbol_changes(&self, quote: &str) -> Result<Vec<SymbolChange>, ApiError> {
        let quote = quote.to_uppercase();
        let mut rows: Vec<SymbolChange> = self
            .tickers(None)
            .await?
            .iter()
            .filter(|t| t.symbol.ends_with(&quote))
            .map(Ticker::to_symbol_change)
            .collect();
        sort_by_change_desc(&mut rows);
        Ok(rows)
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let envelope: Envelope<T> = get_json(&self.client, &self.base_url, path, query).await?;
        envelope.into_data()
    }
}
