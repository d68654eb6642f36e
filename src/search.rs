//! Debounced coin search
//!
//! Keystrokes arm a single-slot timer; only when input pauses for the
//! debounce delay does a query actually run against the cached top-100
//! pool. Superseded queries are simply abandoned (last write wins); an
//! in-flight request is never cancelled, its result is just overwritten.

use crate::{
    client::CoinloreClient,
    constants::{DEBOUNCE_DELAY_MS, SEARCH_RESULT_LIMIT},
    error::FetchError,
    types::Coin,
};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Single-slot delayed task scheduler
///
/// Arming always aborts the previously armed task before storing the new
/// handle, so at most one timer is pending at any moment.
pub struct Debouncer {
    delay: Duration,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Mutex::new(None),
        }
    }

    /// Schedules `task` to run after the delay, cancelling any pending one
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut slot = self.slot.lock().unwrap();
        if let Some(pending) = slot.take() {
            pending.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }
}

/// Outcome of a search query
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty or whitespace-only query; suppress the suggestion panel
    Hidden,
    /// Query ran but matched nothing
    NoMatches { query: String },
    /// Up to eight matching coins, in source-list order
    Matches(Vec<Coin>),
}

/// Filters the cached coin pool by name or symbol substring
pub struct CoinSearch {
    client: Arc<CoinloreClient>,
}

impl CoinSearch {
    pub fn new(client: Arc<CoinloreClient>) -> Self {
        Self { client }
    }

    /// Runs a query against the top-100 pool
    ///
    /// Empty queries return [`SearchOutcome::Hidden`] without touching
    /// the network. Matching is a case-insensitive substring test on
    /// name or symbol, capped at eight results in source order.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::Hidden);
        }

        let pool = self.client.search_pool().await?;
        let needle = query.to_lowercase();

        let matches: Vec<Coin> = pool
            .into_iter()
            .filter(|coin| {
                coin.name.to_lowercase().contains(&needle)
                    || coin.symbol.to_lowercase().contains(&needle)
            })
            .take(SEARCH_RESULT_LIMIT)
            .collect();

        if matches.is_empty() {
            Ok(SearchOutcome::NoMatches {
                query: query.to_string(),
            })
        } else {
            Ok(SearchOutcome::Matches(matches))
        }
    }
}

/// Search state as published to the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// Nothing to show
    Hidden,
    /// "No coins found matching ..." marker
    NoMatches { query: String },
    /// Suggestion rows
    Matches(Vec<Coin>),
    /// The query's fetch failed; distinct from an empty result
    Failed(String),
}

/// Keystroke-driven search box state
///
/// Owns the debouncer and publishes each settled query's state on a
/// watch channel for renderers to observe.
pub struct DebouncedSearch {
    search: Arc<CoinSearch>,
    debouncer: Debouncer,
    tx: watch::Sender<SearchState>,
}

impl DebouncedSearch {
    pub fn new(client: Arc<CoinloreClient>) -> Self {
        let (tx, _rx) = watch::channel(SearchState::Hidden);
        Self {
            search: Arc::new(CoinSearch::new(client)),
            debouncer: Debouncer::new(Duration::from_millis(DEBOUNCE_DELAY_MS)),
            tx,
        }
    }

    /// Subscribes to search state changes
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    /// Feeds one keystroke's worth of input
    ///
    /// Restarts the debounce timer; the query only runs once input has
    /// been quiet for the full delay.
    pub fn on_input(&self, query: impl Into<String>) {
        let query = query.into();
        let search = Arc::clone(&self.search);
        let tx = self.tx.clone();

        self.debouncer.call(async move {
            let state = match search.search(&query).await {
                Ok(SearchOutcome::Hidden) => SearchState::Hidden,
                Ok(SearchOutcome::NoMatches { query }) => SearchState::NoMatches { query },
                Ok(SearchOutcome::Matches(coins)) => SearchState::Matches(coins),
                Err(e) => {
                    tracing::warn!(error = %e, "Search fetch failed");
                    SearchState::Failed(e.to_string())
                }
            };
            tx.send_replace(state);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::mock::{MockFailure, MockTransport};
    use crate::cache::FetchCache;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pool_json(names: &[(&str, &str)]) -> serde_json::Value {
        let data: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, (name, symbol))| {
                json!({"id": i.to_string(), "name": name, "symbol": symbol})
            })
            .collect();
        json!({ "data": data })
    }

    fn search_over(transport: Arc<MockTransport>) -> CoinSearch {
        let client = CoinloreClient::with_cache(FetchCache::new(transport));
        CoinSearch::new(Arc::new(client))
    }

    #[tokio::test]
    async fn empty_query_issues_no_request() {
        let transport = Arc::new(MockTransport::new());
        let search = search_over(transport.clone());

        assert_eq!(search.search("").await.unwrap(), SearchOutcome::Hidden);
        assert_eq!(search.search("   ").await.unwrap(), SearchOutcome::Hidden);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn matches_are_capped_at_eight_in_source_order() {
        let transport = Arc::new(MockTransport::new());
        let coins: Vec<(String, String)> = (0..12)
            .map(|i| (format!("Bitcoin {}", i), format!("B{}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = coins
            .iter()
            .map(|(n, s)| (n.as_str(), s.as_str()))
            .collect();
        transport.set_default_response(pool_json(&refs));
        let search = search_over(transport);

        match search.search("bitcoin").await.unwrap() {
            SearchOutcome::Matches(found) => {
                assert_eq!(found.len(), 8);
                let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names[0], "Bitcoin 0");
                assert_eq!(names[7], "Bitcoin 7");
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn symbol_matches_case_insensitively() {
        let transport = Arc::new(MockTransport::new());
        transport.set_default_response(pool_json(&[
            ("Bitcoin", "BTC"),
            ("Ethereum", "ETH"),
            ("Tether", "USDT"),
        ]));
        let search = search_over(transport);

        match search.search("eth").await.unwrap() {
            SearchOutcome::Matches(found) => {
                let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["Ethereum", "Tether"]);
            }
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_matches_is_distinct_from_hidden() {
        let transport = Arc::new(MockTransport::new());
        transport.set_default_response(pool_json(&[("Bitcoin", "BTC")]));
        let search = search_over(transport);

        assert_eq!(
            search.search("dogecoin").await.unwrap(),
            SearchOutcome::NoMatches {
                query: "dogecoin".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let transport = Arc::new(MockTransport::new());
        transport.set_failure(MockFailure::Http(503));
        let search = search_over(transport);

        assert!(search.search("btc").await.is_err());
    }

    #[tokio::test]
    async fn debouncer_fires_only_the_last_armed_task() {
        static FIRED: AtomicUsize = AtomicUsize::new(0);
        let debouncer = Debouncer::new(Duration::from_millis(30));

        for _ in 0..3 {
            debouncer.call(async {
                FIRED.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(FIRED.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn debounced_search_publishes_state() {
        let transport = Arc::new(MockTransport::new());
        transport.set_default_response(pool_json(&[("Bitcoin", "BTC")]));
        let client = CoinloreClient::with_cache(FetchCache::new(transport));
        let debounced = DebouncedSearch::new(Arc::new(client));
        let mut rx = debounced.subscribe();

        debounced.on_input("doge");
        debounced.on_input("bitc");

        rx.changed().await.unwrap();
        match &*rx.borrow() {
            SearchState::Matches(found) => assert_eq!(found[0].symbol, "BTC"),
            other => panic!("expected matches, got {:?}", other),
        };
    }

    #[tokio::test]
    async fn debounced_search_surfaces_failures() {
        let transport = Arc::new(MockTransport::new());
        transport.set_failure(MockFailure::Timeout);
        let client = CoinloreClient::with_cache(FetchCache::new(transport));
        let debounced = DebouncedSearch::new(Arc::new(client));
        let mut rx = debounced.subscribe();

        debounced.on_input("btc");
        rx.changed().await.unwrap();

        assert!(matches!(&*rx.borrow(), SearchState::Failed(_)));
    }
}
