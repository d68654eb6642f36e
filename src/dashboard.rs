//! Dashboard controller
//!
//! Owns all state shared across the dashboard widgets: the API client
//! and its cache, the top-list loading flag, the currently shown coin
//! and chart period, and the converter.
//! Renderers call in on user actions and observe the broadcast event
//! stream for transient notifications.

use crate::{
    chart::{synthetic_hourly_change, synthetic_series, ChartPeriod, ChartSeries},
    client::CoinloreClient,
    constants::{CONVERTER_CHOICE_LIMIT, REFRESH_INTERVAL_SECS},
    convert::{AmountWarning, CoinChoice, ConversionDisplay, ConverterState, ConverterWarning},
    error::FetchError,
    format::{format_currency, format_number, format_percent},
    types::{Coin, DashboardEvent},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::time::sleep;

/// View-model for the coin detail panel: plain data and pre-formatted
/// strings, ready for markup injection by the rendering layer
#[derive(Debug, Clone)]
pub struct CoinDetail {
    pub name: String,
    pub symbol: String,
    pub price_text: String,
    /// 24h change, raw percent (sign drives the up/down styling)
    pub change_24h: f64,
    pub change_24h_text: String,
    pub change_7d: f64,
    pub change_7d_text: String,
    /// Placeholder figure, not backed by the upstream API
    pub change_1h: f64,
    pub change_1h_text: String,
    pub market_cap_text: String,
    pub volume_text: String,
    pub circulating_supply_text: String,
    /// `"N/A"` when the coin reports no maximum supply
    pub max_supply_text: String,
    pub rank_text: String,
    pub chart: ChartSeries,
}

impl CoinDetail {
    fn build(coin: &Coin, period: ChartPeriod) -> Self {
        let change_1h = synthetic_hourly_change(None);
        Self {
            name: coin.name.clone(),
            symbol: coin.symbol.clone(),
            price_text: format_currency(coin.price_usd),
            change_24h: coin.percent_change_24h,
            change_24h_text: format_percent(coin.percent_change_24h),
            change_7d: coin.percent_change_7d,
            change_7d_text: format_percent(coin.percent_change_7d),
            change_1h,
            change_1h_text: format_percent(change_1h),
            market_cap_text: format_currency(coin.market_cap_usd),
            volume_text: format_currency(coin.volume24),
            circulating_supply_text: format_number(coin.csupply),
            max_supply_text: if coin.msupply > 0.0 {
                format_number(coin.msupply)
            } else {
                "N/A".to_string()
            },
            rank_text: format!("#{}", coin.rank),
            chart: synthetic_series(coin.price_usd, coin.percent_change_24h, period, None),
        }
    }
}

struct ViewState {
    current_coin: Option<Coin>,
    period: ChartPeriod,
}

/// Application-state controller for the dashboard
pub struct Dashboard {
    client: Arc<CoinloreClient>,
    is_loading: AtomicBool,
    view: RwLock<ViewState>,
    converter: RwLock<ConverterState>,
    events: broadcast::Sender<DashboardEvent>,
}

impl Dashboard {
    /// Creates a controller over the given client
    pub fn new(client: Arc<CoinloreClient>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            client,
            is_loading: AtomicBool::new(false),
            view: RwLock::new(ViewState {
                current_coin: None,
                period: ChartPeriod::default(),
            }),
            converter: RwLock::new(ConverterState::new()),
            events,
        }
    }

    /// Subscribes to transient dashboard events (the toast analog)
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: DashboardEvent) {
        // Delivery is best-effort; nobody listening is fine.
        let _ = self.events.send(event);
    }

    /// Loads the top coins list
    ///
    /// Guarded by a single loading flag: while one load is in flight,
    /// further calls return `Ok(None)` without fetching. The guard
    /// covers this view only.
    ///
    /// With `announce` set (the periodic refresh path), the outcome is
    /// also broadcast as a [`DashboardEvent`].
    pub async fn load_top_coins(&self, announce: bool) -> Result<Option<Vec<Coin>>, FetchError> {
        if self.is_loading.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }

        let result = self.client.top_coins().await;
        self.is_loading.store(false, Ordering::SeqCst);

        match result {
            Ok(coins) => {
                if announce {
                    self.emit(DashboardEvent::refreshed(coins.len()));
                }
                Ok(Some(coins))
            }
            Err(e) => {
                if announce {
                    self.emit(DashboardEvent::refresh_failed(e.to_string()));
                }
                Err(e)
            }
        }
    }

    /// Fetches a coin, records it as current, and assembles its detail
    /// view together with a chart series for the current period
    pub async fn show_coin(&self, id: &str) -> Result<CoinDetail, FetchError> {
        let coin = self.client.coin(id).await?;

        let mut view = self.view.write().await;
        let detail = CoinDetail::build(&coin, view.period);
        view.current_coin = Some(coin);

        Ok(detail)
    }

    /// Switches the chart period and rebuilds the current coin's detail
    ///
    /// Returns `Ok(None)` when no coin is shown yet. The coin is
    /// re-fetched through the cache, so within the TTL this is a
    /// memory-only operation.
    pub async fn set_period(&self, period: ChartPeriod) -> Result<Option<CoinDetail>, FetchError> {
        let current_id = {
            let mut view = self.view.write().await;
            view.period = period;
            view.current_coin.as_ref().map(|coin| coin.id.clone())
        };

        match current_id {
            Some(id) => Ok(Some(self.show_coin(&id).await?)),
            None => Ok(None),
        }
    }

    /// Currently selected chart period
    pub async fn period(&self) -> ChartPeriod {
        self.view.read().await.period
    }

    /// Fills the converter choice list from the ticker API
    ///
    /// Fetches the converter pool, offers the first twenty coins as
    /// targets, and selects the first as default.
    pub async fn load_converter_choices(&self) -> Result<ConversionDisplay, FetchError> {
        let pool = self.client.converter_pool().await?;
        let choices: Vec<CoinChoice> = pool
            .iter()
            .take(CONVERTER_CHOICE_LIMIT)
            .map(CoinChoice::from)
            .collect();

        self.emit(DashboardEvent::choices_loaded(choices.len()));
        Ok(self.converter.write().await.set_choices(choices))
    }

    /// Validates and applies a converter amount
    pub async fn set_converter_amount(
        &self,
        raw: &str,
    ) -> (ConversionDisplay, Option<AmountWarning>) {
        self.converter.write().await.set_amount(raw)
    }

    /// Selects a converter target by choice index
    pub async fn select_converter_target(&self, index: usize) -> ConversionDisplay {
        self.converter.write().await.select_target(index)
    }

    /// Swaps the converter's source and target sides
    pub async fn swap_converter(&self) -> Result<ConversionDisplay, ConverterWarning> {
        self.converter.write().await.swap()
    }

    /// Resets the converter to its defaults
    pub async fn reset_converter(&self) -> ConversionDisplay {
        self.converter.write().await.reset()
    }

    /// Starts the periodic top-coins refresh
    ///
    /// Fire-and-forget: the task re-runs the refresh every interval for
    /// the lifetime of the process and is never cancelled.
    pub fn start_refresh_task(self: &Arc<Self>) {
        let dashboard = Arc::clone(self);

        tokio::spawn(async move {
            tracing::info!(
                refresh_interval_secs = REFRESH_INTERVAL_SECS,
                "Starting top coins refresh task"
            );

            loop {
                sleep(Duration::from_secs(REFRESH_INTERVAL_SECS)).await;

                if let Err(e) = dashboard.load_top_coins(true).await {
                    tracing::warn!(error = %e, "Scheduled top coins refresh failed");
                }
            }
        });
    }
}
