//! Types for the dashboard data core

use crate::format::safe_parse_value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single coin as served by the ticker API.
///
/// The upstream serves most numeric fields as strings; absent or
/// malformed values deserialize to zero. All fields are display-only,
/// no range invariants are enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Upstream identifier, used for single-coin lookups
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    /// Full name, e.g. "Bitcoin"
    #[serde(default)]
    pub name: String,

    /// Ticker symbol, e.g. "BTC"
    #[serde(default)]
    pub symbol: String,

    /// Market cap rank (ordinal)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rank: u32,

    /// Price in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: f64,

    /// 24h price change percentage
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_change_24h: f64,

    /// 7d price change percentage
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_change_7d: f64,

    /// Market capitalization in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_cap_usd: f64,

    /// 24h trading volume in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume24: f64,

    /// Circulating supply
    #[serde(default, deserialize_with = "lenient_f64")]
    pub csupply: f64,

    /// Maximum supply; zero when the coin has none reported
    #[serde(default, deserialize_with = "lenient_f64")]
    pub msupply: f64,
}

/// Envelope of the list ticker endpoints: `{ "data": [ ... ] }`
#[derive(Debug, Deserialize)]
pub struct TickerPage {
    pub data: Vec<Coin>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_parse_value(&value))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(safe_parse_value(&value).max(0.0) as u32)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Dashboard events broadcast to subscribers (the toast-notification
/// analog of the rendering layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardEvent {
    /// The top coins list was refreshed
    TopCoinsRefreshed {
        id: Uuid,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A top coins refresh failed
    TopCoinsRefreshFailed {
        id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// The converter choice list was (re)loaded
    ConverterChoicesLoaded {
        id: Uuid,
        count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            DashboardEvent::TopCoinsRefreshed { id, .. } => *id,
            DashboardEvent::TopCoinsRefreshFailed { id, .. } => *id,
            DashboardEvent::ConverterChoicesLoaded { id, .. } => *id,
        }
    }

    pub(crate) fn refreshed(count: usize) -> Self {
        DashboardEvent::TopCoinsRefreshed {
            id: Uuid::new_v4(),
            count,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn refresh_failed(message: String) -> Self {
        DashboardEvent::TopCoinsRefreshFailed {
            id: Uuid::new_v4(),
            message,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn choices_loaded(count: usize) -> Self {
        DashboardEvent::ConverterChoicesLoaded {
            id: Uuid::new_v4(),
            count,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for DashboardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardEvent::TopCoinsRefreshed { count, .. } => {
                write!(f, "Cryptocurrency data updated ({} coins)", count)
            }
            DashboardEvent::TopCoinsRefreshFailed { message, .. } => {
                write!(f, "Failed to update cryptocurrency data: {}", message)
            }
            DashboardEvent::ConverterChoicesLoaded { count, .. } => {
                write!(f, "Loaded {} cryptocurrencies for conversion", count)
            }
        }
    }
}
