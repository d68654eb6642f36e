//! Time-boxed HTTP fetching with a short-lived in-memory cache
//!
//! Every outbound request goes through [`FetchCache::fetch`], which keys
//! payloads by a logical request name and serves them from memory while
//! they are fresh. The caching policy is a single fixed TTL: no LRU, no
//! size bound, no per-URL variation. Entries are never deleted, only
//! superseded by a fresh payload under the same key.
//!
//! Concurrent misses under one key are not deduplicated; each hits the
//! network and the last writer wins. The cache map is only ever touched
//! from cooperative tasks on the runtime, so the redundant call wastes a
//! request but cannot corrupt state.

use crate::{
    constants::{CACHE_TTL_MS, REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::FetchError,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A cached payload and the moment it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry {
    payload: Value,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(payload: Value) -> Self {
        Self {
            payload,
            fetched_at: Utc::now(),
        }
    }

    /// True while the entry is younger than `ttl`
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.fetched_at) < ttl
    }
}

/// Trait for issuing HTTP GET requests that return JSON
///
/// The cache talks to the network through this seam so tests can count
/// and script requests without sockets.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the URL and decodes the body as JSON
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Production transport backed by reqwest
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the crate's timeout and user agent
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new().expect("Failed to create HTTP transport")
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;

        serde_json::from_str(&body)
            .map_err(|e| FetchError::parse(format!("Failed to parse response: {}", e)))
    }
}

/// In-memory fetch cache keyed by logical request name
pub struct FetchCache {
    transport: Arc<dyn Transport>,
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl FetchCache {
    /// Creates a cache over the given transport with the default TTL
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_ttl(transport, Duration::milliseconds(CACHE_TTL_MS))
    }

    /// Creates a cache with a custom TTL
    ///
    /// This is primarily for testing expiry without waiting a minute.
    pub fn with_ttl(transport: Arc<dyn Transport>, ttl: Duration) -> Self {
        Self {
            transport,
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached payload for `key`, or fetches `url` and stores it
    ///
    /// # Arguments
    /// * `url` - Full request URL
    /// * `key` - Logical cache key, e.g. `topCoins`
    ///
    /// # Returns
    /// The (possibly cached) JSON payload, or a [`FetchError`] when the
    /// network round trip or decoding fails. A failed fetch leaves any
    /// stale entry in place untouched.
    pub async fn fetch(&self, url: &str, key: &str) -> Result<Value, FetchError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(key) {
                if entry.is_fresh(self.ttl) {
                    tracing::debug!(key = key, "Cache hit");
                    return Ok(entry.payload.clone());
                }
            }
        }

        tracing::debug!(key = key, url = url, "Cache miss, fetching");
        let payload = self.transport.get_json(url).await?;

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(payload.clone()));

        Ok(payload)
    }

    /// Number of keys currently held (fresh or stale)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no payload has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
