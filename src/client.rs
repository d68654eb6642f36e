//! Coinlore ticker API client
//!
//! Typed endpoints over the [`FetchCache`]. Each endpoint carries its
//! own logical cache key, so repeated calls inside the TTL are served
//! from memory.

use crate::{
    cache::{FetchCache, HttpTransport},
    constants::{API_BASE_URL, CONVERTER_POOL_LIMIT, SEARCH_POOL_LIMIT, TOP_COINS_LIMIT},
    error::FetchError,
    types::{Coin, TickerPage},
};
use std::sync::Arc;

/// Client for the Coinlore public ticker API
pub struct CoinloreClient {
    cache: FetchCache,
}

impl CoinloreClient {
    /// Creates a client with the production HTTP transport
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            cache: FetchCache::new(Arc::new(HttpTransport::new()?)),
        })
    }

    /// Creates a client over a pre-built cache
    ///
    /// This is primarily for testing with a mock transport.
    pub fn with_cache(cache: FetchCache) -> Self {
        Self { cache }
    }

    fn tickers_url(start: u32, limit: u32) -> String {
        format!("{}/tickers/?start={}&limit={}", API_BASE_URL, start, limit)
    }

    async fn tickers(&self, start: u32, limit: u32, key: &str) -> Result<Vec<Coin>, FetchError> {
        let url = Self::tickers_url(start, limit);
        let payload = self.cache.fetch(&url, key).await?;

        let page: TickerPage = serde_json::from_value(payload)
            .map_err(|e| FetchError::parse(format!("Unexpected ticker page shape: {}", e)))?;

        tracing::debug!(key = key, count = page.data.len(), "Decoded ticker page");
        Ok(page.data)
    }

    /// The coins shown in the top list
    pub async fn top_coins(&self) -> Result<Vec<Coin>, FetchError> {
        self.tickers(0, TOP_COINS_LIMIT, "topCoins").await
    }

    /// The top-100 pool search suggestions are filtered from
    pub async fn search_pool(&self) -> Result<Vec<Coin>, FetchError> {
        self.tickers(0, SEARCH_POOL_LIMIT, "allCoins").await
    }

    /// The pool the converter choice list is built from
    pub async fn converter_pool(&self) -> Result<Vec<Coin>, FetchError> {
        self.tickers(0, CONVERTER_POOL_LIMIT, "converterCoins").await
    }

    /// Looks up a single coin by its upstream id
    ///
    /// The upstream replies with a single-element array; an empty reply
    /// is treated as a decoding failure.
    pub async fn coin(&self, id: &str) -> Result<Coin, FetchError> {
        let url = format!("{}/ticker/?id={}", API_BASE_URL, id);
        let key = format!("coin_{}", id);
        let payload = self.cache.fetch(&url, &key).await?;

        let mut coins: Vec<Coin> = serde_json::from_value(payload)
            .map_err(|e| FetchError::parse(format!("Unexpected ticker shape: {}", e)))?;

        if coins.is_empty() {
            return Err(FetchError::parse(format!("No ticker data for id {}", id)));
        }
        Ok(coins.remove(0))
    }
}
