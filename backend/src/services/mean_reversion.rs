//! Mean reversion of monthly growth after takeoff.
//!
//! Growth in the takeoff period is compared with growth afterwards, the
//! views-per-video trend gives a direction, and cumulative views are set
//! against a projection compounding the median monthly growth.

use log::debug;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::services::alignment::CalendarBucket;
use crate::services::rolling::rolling_growth;
use crate::services::stats::{least_squares, mean, median, LinearFit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Declining,
    Growing,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Declining => write!(f, "Declining"),
            TrendDirection::Growing => write!(f, "Growing"),
        }
    }
}

/// Actual against projected cumulative views at one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub index: i64,
    pub actual_cumulative: f64,
    pub projected_cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanReversionAnalysis {
    pub early_growth: Vec<f64>,
    pub later_growth: Vec<f64>,
    pub early_mean: Option<f64>,
    pub later_mean: Option<f64>,
    /// Views-per-video regression over bucket position.
    pub views_per_video_trend: Option<LinearFit>,
    pub direction: Option<TrendDirection>,
    /// Median monthly growth as a fraction; 0 when no growth is defined.
    pub median_growth: f64,
    pub projection: Vec<ProjectionPoint>,
}

/// Mean-reversion analysis over takeoff-aligned buckets.
pub fn analyze_mean_reversion(
    buckets: &[CalendarBucket],
    config: &AnalysisConfig,
) -> MeanReversionAnalysis {
    let totals: Vec<f64> = buckets.iter().map(|b| b.total_views as f64).collect();
    let growth = rolling_growth(&totals);

    let mut early_growth = Vec::new();
    let mut later_growth = Vec::new();
    for (bucket, value) in buckets.iter().zip(growth.iter()) {
        if let Some(value) = value {
            if bucket.index < config.early_period_months {
                early_growth.push(*value);
            } else {
                later_growth.push(*value);
            }
        }
    }

    let views_per_video_trend = least_squares(
        buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (i as f64, Some(b.avg_views_per_video))),
    );
    let direction = views_per_video_trend.map(|fit| {
        if fit.slope < 0.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Growing
        }
    });

    let defined_growth: Vec<f64> = growth.iter().filter_map(|g| *g).collect();
    let median_growth = median(&defined_growth).map(|m| m / 100.0).unwrap_or(0.0);

    let mut projection = Vec::with_capacity(buckets.len());
    let mut actual_cumulative = 0.0;
    let mut projected_cumulative = 0.0;
    let mut projected_month = totals.first().copied().unwrap_or(0.0);
    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            projected_month *= 1.0 + median_growth;
        }
        actual_cumulative += totals[i];
        projected_cumulative += projected_month;
        projection.push(ProjectionPoint {
            index: bucket.index,
            actual_cumulative,
            projected_cumulative,
        });
    }

    debug!(
        "mean reversion: {} early / {} later growth values, median growth {:.4}",
        early_growth.len(),
        later_growth.len(),
        median_growth
    );

    MeanReversionAnalysis {
        early_mean: mean(&early_growth),
        later_mean: mean(&later_growth),
        early_growth,
        later_growth,
        views_per_video_trend,
        direction,
        median_growth,
        projection,
    }
}
