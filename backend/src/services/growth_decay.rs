//! Actual cumulative views against a compound-growth extrapolation.
//!
//! The extrapolation is anchored at the last video published in or before the
//! takeoff year and grows at the rate observed across that year. The gap at
//! the end of the series tells how far naive extrapolation overshoots (positive)
//! or undershoots (negative) what actually happened.

use log::{debug, warn};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::MetricIssue;
use crate::models::{elapsed_days, years_between, ChannelSeries};
use crate::services::stats::interpolate;

/// One point of a cumulative-views curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Whole days since the channel's first upload.
    pub days: f64,
    pub cumulative_views: f64,
}

/// Where the extrapolation starts and how fast it grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtrapolationAnchor {
    pub days: i64,
    pub cumulative_views: u64,
    /// Fractional growth across the takeoff year.
    pub growth_rate: f64,
}

impl ExtrapolationAnchor {
    /// Projected cumulative views at `day`.
    pub fn project(&self, day: f64, days_per_year: f64) -> f64 {
        let years = years_between(self.days as f64, day, days_per_year);
        self.cumulative_views as f64 * (1.0 + self.growth_rate).powf(years)
    }
}

/// One extrapolation sample with the actual curve interpolated at the same day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtrapolationSample {
    pub days: f64,
    pub projected_views: f64,
    pub actual_views: f64,
}

/// Growth-decay result for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthDecayAnalysis {
    pub takeoff_year: i32,
    pub actual: Vec<CurvePoint>,
    /// Empty when the takeoff year has no videos.
    pub extrapolated: Vec<ExtrapolationSample>,
    pub anchor: Option<ExtrapolationAnchor>,
    /// `(extrapolated_final - actual_final) / actual_final * 100`.
    pub gap_pct: Option<f64>,
    pub issues: Vec<MetricIssue>,
}

impl GrowthDecayAnalysis {
    /// Cumulative views at the last record.
    pub fn actual_final(&self) -> f64 {
        self.actual.last().map(|p| p.cumulative_views).unwrap_or(0.0)
    }

    /// Last projected value, if an extrapolation exists.
    pub fn extrapolated_final(&self) -> Option<f64> {
        self.extrapolated.last().map(|s| s.projected_views)
    }
}

/// Running sum of views against days since the first upload.
pub(crate) fn compute_actual_curve(series: &ChannelSeries) -> Vec<CurvePoint> {
    let origin = series.first_published();
    let mut cumulative = 0u64;
    series
        .iter()
        .map(|record| {
            cumulative += record.view_count;
            CurvePoint {
                days: elapsed_days(origin, record.published_at) as f64,
                cumulative_views: cumulative as f64,
            }
        })
        .collect()
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Compare the actual trajectory with the extrapolation from `takeoff_year`.
///
/// # Arguments
/// * `series` - Channel records
/// * `takeoff_year` - Year the extrapolation is anchored at
/// * `config` - Sample count and year length
///
/// # Returns
/// The actual curve, the sampled extrapolation and the final gap. Metrics that
/// cannot be defined are left empty or `None` and explained in `issues`.
pub fn analyze(
    series: &ChannelSeries,
    takeoff_year: i32,
    config: &AnalysisConfig,
) -> GrowthDecayAnalysis {
    let actual = compute_actual_curve(series);
    let mut issues = Vec::new();

    let takeoff_videos = series.iter().filter(|r| r.year() == takeoff_year).count();
    if takeoff_videos == 0 {
        let issue = MetricIssue::insufficient("gap_pct", 1, 0);
        warn!("{}: no videos in takeoff year {}: {}", series.name(), takeoff_year, issue);
        issues.push(issue);
        return GrowthDecayAnalysis {
            takeoff_year,
            actual,
            extrapolated: Vec::new(),
            anchor: None,
            gap_pct: None,
            issues,
        };
    }

    let origin = series.first_published();
    let mut cumulative = 0u64;
    let mut before_takeoff: Option<u64> = None;
    let mut anchor: Option<(i64, u64)> = None;
    for record in series {
        if record.year() > takeoff_year {
            break;
        }
        cumulative += record.view_count;
        if record.year() < takeoff_year {
            before_takeoff = Some(cumulative);
        }
        anchor = Some((elapsed_days(origin, record.published_at), cumulative));
    }

    let (anchor_days, anchor_views) = anchor.unwrap_or((0, 0));

    let growth_rate = match before_takeoff {
        Some(start) if start > 0 => (anchor_views as f64 - start as f64) / start as f64,
        _ => {
            let issue = MetricIssue::degenerate("extrapolation_rate", 0.0);
            warn!("{}: {}", series.name(), issue);
            issues.push(issue);
            0.0
        }
    };

    let anchor = ExtrapolationAnchor {
        days: anchor_days,
        cumulative_views: anchor_views,
        growth_rate,
    };

    let actual_points: Vec<(f64, f64)> = actual
        .iter()
        .map(|p| (p.days, p.cumulative_views))
        .collect();
    let final_day = actual.last().map(|p| p.days).unwrap_or(anchor_days as f64);

    let extrapolated: Vec<ExtrapolationSample> =
        linspace(anchor_days as f64, final_day, config.extrapolation_points)
            .into_iter()
            .map(|days| ExtrapolationSample {
                days,
                projected_views: anchor.project(days, config.days_per_year),
                actual_views: interpolate(&actual_points, days).unwrap_or(0.0),
            })
            .collect();

    let actual_final = actual.last().map(|p| p.cumulative_views).unwrap_or(0.0);
    let gap_pct = match extrapolated.last() {
        Some(last) if actual_final > 0.0 => {
            Some((last.projected_views - actual_final) / actual_final * 100.0)
        }
        _ => {
            let issue = MetricIssue::undefined("gap_pct");
            warn!("{}: {}", series.name(), issue);
            issues.push(issue);
            None
        }
    };

    debug!(
        "{}: anchor day {} views {} rate {:.4} gap {:?}",
        series.name(),
        anchor_days,
        anchor_views,
        growth_rate,
        gap_pct
    );

    GrowthDecayAnalysis {
        takeoff_year,
        actual,
        extrapolated,
        anchor: Some(anchor),
        gap_pct,
        issues,
    }
}
