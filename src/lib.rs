//! # Coin Dashboard SDK
//!
//! Data core for a browser-style cryptocurrency market dashboard:
//! cached ticker fetching, coin search, a currency-to-crypto converter
//! and illustrative chart series. Rendering is out of scope - the crate
//! hands plain data and pre-formatted strings to whatever draws them.
//!
//! All market data comes from the public Coinlore ticker API through a
//! single fetch cache with a fixed 60-second TTL, so repeated widget
//! refreshes inside that window never touch the network.
//!
//! ## Usage
//!
//! ```no_run
//! use coin_dashboard_sdk::{CoinloreClient, Dashboard, format_currency};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(CoinloreClient::new()?);
//! let dashboard = Arc::new(Dashboard::new(client));
//!
//! // Periodic top-list refresh, fire-and-forget
//! dashboard.start_refresh_task();
//!
//! if let Some(coins) = dashboard.load_top_coins(false).await? {
//!     for coin in coins {
//!         println!("{} ({}): {}", coin.name, coin.symbol, format_currency(coin.price_usd));
//!     }
//! }
//!
//! let detail = dashboard.show_coin("90").await?;
//! println!("{} is ranked {}", detail.name, detail.rank_text);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod chart;
pub mod client;
pub mod constants;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheEntry, FetchCache, HttpTransport, Transport};
pub use chart::{synthetic_series, ChartPeriod, ChartSeries};
pub use client::CoinloreClient;
pub use convert::{
    convert, validate_amount, AmountWarning, CoinChoice, ConversionDisplay, ConversionOutcome,
    ConverterState, ConverterWarning,
};
pub use dashboard::{CoinDetail, Dashboard};
pub use error::FetchError;
pub use format::{format_currency, format_number, format_percent, safe_parse_float};
pub use search::{CoinSearch, DebouncedSearch, Debouncer, SearchOutcome, SearchState};
pub use types::{Coin, DashboardEvent};
