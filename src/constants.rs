//! Constants for the dashboard data core
//!
//! All configuration is centralized here. No runtime configuration
//! (config files, environment variables) is used - the system operates
//! transparently with these compile-time constants.

/// Coinlore API base URL
pub const API_BASE_URL: &str = "https://api.coinlore.net/api";

/// How long a cached payload is considered fresh (in milliseconds)
pub const CACHE_TTL_MS: i64 = 60_000;

/// HTTP request timeout when fetching tickers (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// How often the background task refreshes the top coins list (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 120;

/// Pause in keystroke activity before a search query is issued (in milliseconds)
pub const DEBOUNCE_DELAY_MS: u64 = 300;

/// Maximum number of search suggestions returned
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Size of the coin pool searched against
pub const SEARCH_POOL_LIMIT: u32 = 100;

/// Number of coins shown in the top list
pub const TOP_COINS_LIMIT: u32 = 10;

/// Number of coins fetched for the converter dropdown
pub const CONVERTER_POOL_LIMIT: u32 = 50;

/// Number of coins actually offered as conversion targets
pub const CONVERTER_CHOICE_LIMIT: usize = 20;

/// Upper bound on a convertible amount; larger inputs are clamped
pub const MAX_CONVERT_AMOUNT: f64 = 1_000_000.0;

/// Amount the converter resets to
pub const DEFAULT_CONVERT_AMOUNT: f64 = 1.0;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coin-dashboard-sdk/0.1.0";
