//! Synthetic chart series
//!
//! The upstream API has no historical endpoint, so chart data is a
//! pseudo-random walk anchored at the live price. The output is
//! illustrative only and must never be presented as historical data.
//! Passing a seed makes the walk reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Time window a chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl Default for ChartPeriod {
    fn default() -> Self {
        ChartPeriod::Week
    }
}

impl ChartPeriod {
    /// Parses the period token used by the UI (`1d`, `7d`, `1m`, `1y`)
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "1d" => Some(ChartPeriod::Day),
            "7d" => Some(ChartPeriod::Week),
            "1m" => Some(ChartPeriod::Month),
            "1y" => Some(ChartPeriod::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Day => "1d",
            ChartPeriod::Week => "7d",
            ChartPeriod::Month => "1m",
            ChartPeriod::Year => "1y",
        }
    }

    /// Axis labels for this period
    pub fn labels(&self) -> Vec<String> {
        match self {
            ChartPeriod::Day => (0..24).map(|h| format!("{}:00", h)).collect(),
            ChartPeriod::Week => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            ChartPeriod::Month => (1..=30).map(|d| d.to_string()).collect(),
            ChartPeriod::Year => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }

    /// Number of data points plotted for this period
    pub fn point_count(&self) -> usize {
        match self {
            ChartPeriod::Day => 24,
            ChartPeriod::Week => 7,
            ChartPeriod::Month => 30,
            ChartPeriod::Year => 12,
        }
    }
}

/// Labels plus points, ready for the chart renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub points: Vec<f64>,
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates an illustrative price walk for a period
///
/// The first point is the live price. Step size scales with the 24h
/// change magnitude, and each point is floored at 80% of its
/// predecessor so the walk cannot collapse.
pub fn synthetic_series(
    price: f64,
    change_pct: f64,
    period: ChartPeriod,
    seed: Option<u64>,
) -> ChartSeries {
    let mut rng = rng_from(seed);
    let volatility = change_pct.abs() / 100.0;
    let count = period.point_count();

    let mut points = Vec::with_capacity(count);
    let mut prev = price;
    points.push(price);

    for _ in 1..count {
        let fluctuation = (rng.gen::<f64>() - 0.5) * (price * volatility * 0.1);
        let next = (prev + fluctuation).max(prev * 0.8);
        points.push(next);
        prev = next;
    }

    ChartSeries {
        labels: period.labels(),
        points,
    }
}

/// Placeholder 1-hour change in (-5, +5) percent
///
/// The upstream flow carries no 1h figure; this stands in for display
/// and is as illustrative as the chart walk.
pub fn synthetic_hourly_change(seed: Option<u64>) -> f64 {
    (rng_from(seed).gen::<f64>() - 0.5) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_tokens_round_trip() {
        for period in [
            ChartPeriod::Day,
            ChartPeriod::Week,
            ChartPeriod::Month,
            ChartPeriod::Year,
        ] {
            assert_eq!(ChartPeriod::parse(period.as_str()), Some(period));
        }
        assert_eq!(ChartPeriod::parse("2w"), None);
    }

    #[test]
    fn labels_match_point_counts() {
        for period in [
            ChartPeriod::Day,
            ChartPeriod::Week,
            ChartPeriod::Month,
            ChartPeriod::Year,
        ] {
            assert_eq!(period.labels().len(), period.point_count());
        }
        assert_eq!(ChartPeriod::Week.labels()[0], "Mon");
        assert_eq!(ChartPeriod::Day.labels()[23], "23:00");
    }

    #[test]
    fn series_starts_at_the_live_price() {
        let series = synthetic_series(50_000.0, 2.5, ChartPeriod::Week, Some(7));
        assert_eq!(series.points.len(), 7);
        assert_eq!(series.points[0], 50_000.0);
    }

    #[test]
    fn series_respects_the_floor() {
        let series = synthetic_series(100.0, 95.0, ChartPeriod::Month, Some(3));
        for pair in series.points.windows(2) {
            assert!(pair[1] >= pair[0] * 0.8);
        }
    }

    #[test]
    fn seeded_series_is_reproducible() {
        let a = synthetic_series(123.45, 4.2, ChartPeriod::Year, Some(99));
        let b = synthetic_series(123.45, 4.2, ChartPeriod::Year, Some(99));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_change_walks_flat() {
        let series = synthetic_series(10.0, 0.0, ChartPeriod::Week, Some(1));
        assert!(series.points.iter().all(|p| *p == 10.0));
    }

    #[test]
    fn hourly_change_stays_in_range() {
        for seed in 0..50 {
            let change = synthetic_hourly_change(Some(seed));
            assert!(change > -5.0 && change < 5.0);
        }
    }
}
