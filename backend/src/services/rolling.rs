//! Month-over-month growth with trailing trend and volatility.
//!
//! Every per-bucket value is an `Option`: the first bucket has no growth, a
//! zero previous total makes growth undefined, and windows with too few
//! defined values produce no trend or volatility. The two scalar outputs
//! (decay slope and mean volatility) fall back to 0.

use log::debug;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::MetricIssue;
use crate::services::alignment::CalendarBucket;
use crate::services::stats::{mean, sample_std_dev, slope_or_zero};

/// Rolling statistics for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingPoint {
    pub index: i64,
    pub total_views: u64,
    pub growth_pct: Option<f64>,
    pub trend: Option<f64>,
    pub volatility: Option<f64>,
}

/// Rolling statistics over a bucket sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingSeries {
    pub points: Vec<RollingPoint>,
    /// Least-squares slope of the trend against bucket index.
    pub decay_slope: f64,
    /// Mean of the defined volatility values.
    pub mean_volatility: f64,
    pub issues: Vec<MetricIssue>,
}

impl RollingSeries {
    pub fn growth(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.growth_pct).collect()
    }

    pub fn trend(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.trend).collect()
    }

    pub fn volatility(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.volatility).collect()
    }
}

/// Percentage change between consecutive totals.
///
/// `growth[0]` is always `None`, as is any entry whose previous total is zero.
pub fn rolling_growth(totals: &[f64]) -> Vec<Option<f64>> {
    let mut growth = Vec::with_capacity(totals.len());
    for i in 0..totals.len() {
        if i == 0 {
            growth.push(None);
            continue;
        }
        let prev = totals[i - 1];
        if prev == 0.0 {
            growth.push(None);
        } else {
            growth.push(Some((totals[i] - prev) / prev * 100.0));
        }
    }
    growth
}

/// Defined values of the trailing window ending at `i`.
fn window_values(values: &[Option<f64>], i: usize, window: usize) -> Vec<f64> {
    let start = (i + 1).saturating_sub(window);
    values[start..=i].iter().filter_map(|v| *v).collect()
}

/// Trailing mean over the current and `window - 1` prior values.
pub fn rolling_trend(growth: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..growth.len())
        .map(|i| mean(&window_values(growth, i, window)))
        .collect()
}

/// Trailing sample standard deviation; at least two defined values required.
pub fn rolling_volatility(growth: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..growth.len())
        .map(|i| sample_std_dev(&window_values(growth, i, window)))
        .collect()
}

/// Least-squares slope of `trend` against `indices`, 0 with fewer than two points.
pub fn trend_slope(indices: &[i64], trend: &[Option<f64>]) -> f64 {
    slope_or_zero(
        indices
            .iter()
            .zip(trend.iter())
            .map(|(index, value)| (*index as f64, *value)),
    )
}

/// Full rolling statistics for a bucket sequence.
pub fn compute_rolling_series(buckets: &[CalendarBucket], config: &AnalysisConfig) -> RollingSeries {
    let totals: Vec<f64> = buckets.iter().map(|b| b.total_views as f64).collect();
    let indices: Vec<i64> = buckets.iter().map(|b| b.index).collect();

    let growth = rolling_growth(&totals);
    let trend = rolling_trend(&growth, config.rolling_window);
    let volatility = rolling_volatility(&growth, config.rolling_window);

    let mut issues = Vec::new();

    let defined_trend = trend.iter().filter(|v| v.is_some()).count();
    if defined_trend < 2 {
        debug!("decay slope undefined, {} defined trend points", defined_trend);
        issues.push(MetricIssue::undefined("decay_slope"));
    }
    let decay_slope = trend_slope(&indices, &trend);

    let defined_volatility: Vec<f64> = volatility.iter().filter_map(|v| *v).collect();
    let mean_volatility = match mean(&defined_volatility) {
        Some(value) => value,
        None => {
            issues.push(MetricIssue::undefined("mean_volatility"));
            0.0
        }
    };

    debug!(
        "rolling over {} buckets: slope {:.4}, mean volatility {:.4}",
        buckets.len(),
        decay_slope,
        mean_volatility
    );

    let points = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| RollingPoint {
            index: bucket.index,
            total_views: bucket.total_views,
            growth_pct: growth[i],
            trend: trend[i],
            volatility: volatility[i],
        })
        .collect();

    RollingSeries {
        points,
        decay_slope,
        mean_volatility,
        issues,
    }
}
