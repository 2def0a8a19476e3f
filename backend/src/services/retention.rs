//! Two-channel retention and decay comparison.
//!
//! Both channels are aligned on months since their own takeoff year so that
//! channels of different ages can be compared phase by phase. Views per video
//! serves as the retention proxy.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::MetricIssue;
use crate::models::ChannelSeries;
use crate::services::alignment::{bucket_by_month_since_takeoff, CalendarBucket};
use crate::services::rolling::{compute_rolling_series, RollingSeries};
use crate::services::stats::{mean, median};
use crate::services::takeoff::TakeoffDetection;

/// Views-per-video relative to the takeoff bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetentionPoint {
    pub index: i64,
    pub avg_views_per_video: f64,
    /// 100 at the baseline bucket.
    pub retention_index: f64,
}

/// Per-channel side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRetention {
    pub name: String,
    pub takeoff_year: i32,
    pub buckets: Vec<CalendarBucket>,
    pub baseline: f64,
    pub retention: Vec<RetentionPoint>,
    /// Change of mean views per video, first window vs last window, in percent.
    pub retention_change: f64,
    pub rolling: RollingSeries,
    pub decay_slope: f64,
    pub mean_volatility: f64,
    pub total_videos: usize,
    pub total_views: u64,
    pub mean_views_per_video: f64,
    pub median_views_per_video: f64,
    pub post_takeoff_videos: usize,
    pub post_takeoff_mean_views: Option<f64>,
    /// Mean rolling trend over buckets up to `early_growth_months` after takeoff.
    pub early_growth: Option<f64>,
    /// Mean of the last `retention_window` rolling trend values.
    pub recent_growth: Option<f64>,
    pub issues: Vec<MetricIssue>,
}

/// Which channel of a pair a finding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSide {
    A,
    B,
}

impl ChannelSide {
    pub fn other(self) -> Self {
        match self {
            ChannelSide::A => ChannelSide::B,
            ChannelSide::B => ChannelSide::A,
        }
    }
}

/// Narrative flags. `None` means the two channels tie on that metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub faster_decay: Option<ChannelSide>,
    pub declining_retention: Option<ChannelSide>,
    pub higher_volatility: Option<ChannelSide>,
}

/// Result of comparing two channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub channel_a: ChannelRetention,
    pub channel_b: ChannelRetention,
    pub verdict: Verdict,
}

impl ComparisonReport {
    pub fn channel(&self, side: ChannelSide) -> &ChannelRetention {
        match side {
            ChannelSide::A => &self.channel_a,
            ChannelSide::B => &self.channel_b,
        }
    }

    /// All metric issues of both channels, tagged with the channel name.
    pub fn diagnostics(&self) -> Vec<(String, MetricIssue)> {
        [&self.channel_a, &self.channel_b]
            .iter()
            .flat_map(|c| c.issues.iter().map(move |i| (c.name.clone(), i.clone())))
            .collect()
    }
}

/// Baseline average: first bucket at or after takeoff, 1 when missing or zero.
pub(crate) fn compute_baseline(buckets: &[CalendarBucket], issues: &mut Vec<MetricIssue>) -> f64 {
    match buckets.iter().find(|b| b.index >= 0) {
        Some(bucket) if bucket.avg_views_per_video > 0.0 => bucket.avg_views_per_video,
        _ => {
            issues.push(MetricIssue::degenerate("retention_baseline", 1.0));
            1.0
        }
    }
}

/// `(mean(last window) - mean(first window)) / mean(first window) * 100`.
///
/// Needs `retention_min_buckets()` buckets; otherwise, or with a zero early mean, 0.
pub(crate) fn compute_retention_change(
    averages: &[f64],
    config: &AnalysisConfig,
    issues: &mut Vec<MetricIssue>,
) -> f64 {
    let window = config.retention_window;
    let required = config.retention_min_buckets();
    if averages.len() < required {
        issues.push(MetricIssue::insufficient(
            "retention_change",
            required,
            averages.len(),
        ));
        return 0.0;
    }

    let early = mean(&averages[..window]).unwrap_or(0.0);
    let late = mean(&averages[averages.len() - window..]).unwrap_or(0.0);
    if early == 0.0 {
        issues.push(MetricIssue::degenerate("retention_change", 0.0));
        return 0.0;
    }
    (late - early) / early * 100.0
}

/// Takeoff-aligned retention metrics for one channel.
pub fn analyze_retention(
    series: &ChannelSeries,
    takeoff_year: i32,
    config: &AnalysisConfig,
) -> ChannelRetention {
    analyze_retention_with_issues(series, takeoff_year, Vec::new(), config)
}

/// Same as [`analyze_retention`], with `issues` already raised for this
/// channel (e.g. by takeoff detection) listed first.
fn analyze_retention_with_issues(
    series: &ChannelSeries,
    takeoff_year: i32,
    mut issues: Vec<MetricIssue>,
    config: &AnalysisConfig,
) -> ChannelRetention {
    let buckets = bucket_by_month_since_takeoff(series, takeoff_year, config);
    let inherited = issues.len();

    let baseline = compute_baseline(&buckets, &mut issues);
    let retention: Vec<RetentionPoint> = buckets
        .iter()
        .map(|b| RetentionPoint {
            index: b.index,
            avg_views_per_video: b.avg_views_per_video,
            retention_index: b.avg_views_per_video / baseline * 100.0,
        })
        .collect();

    let averages: Vec<f64> = buckets.iter().map(|b| b.avg_views_per_video).collect();
    let retention_change = compute_retention_change(&averages, config, &mut issues);

    let rolling = compute_rolling_series(&buckets, config);
    issues.extend(rolling.issues.iter().cloned());

    for issue in &issues[inherited..] {
        warn!("{}: {}", series.name(), issue);
    }

    let views: Vec<f64> = series.iter().map(|r| r.view_count as f64).collect();

    let post_takeoff: Vec<f64> = series
        .iter()
        .filter(|r| r.year() >= takeoff_year)
        .map(|r| r.view_count as f64)
        .collect();

    let early_trend: Vec<f64> = rolling
        .points
        .iter()
        .filter(|p| p.index <= config.early_growth_months)
        .filter_map(|p| p.trend)
        .collect();
    let recent_start = rolling.points.len().saturating_sub(config.retention_window);
    let recent_trend: Vec<f64> = rolling.points[recent_start..]
        .iter()
        .filter_map(|p| p.trend)
        .collect();

    debug!(
        "{}: baseline {:.1}, retention change {:.2}%",
        series.name(),
        baseline,
        retention_change
    );

    ChannelRetention {
        name: series.name().to_string(),
        takeoff_year,
        baseline,
        retention,
        retention_change,
        decay_slope: rolling.decay_slope,
        mean_volatility: rolling.mean_volatility,
        total_videos: series.len(),
        total_views: series.total_views(),
        mean_views_per_video: mean(&views).unwrap_or(0.0),
        median_views_per_video: median(&views).unwrap_or(0.0),
        post_takeoff_videos: post_takeoff.len(),
        post_takeoff_mean_views: mean(&post_takeoff),
        early_growth: mean(&early_trend),
        recent_growth: mean(&recent_trend),
        buckets,
        rolling,
        issues,
    }
}

/// Pick the side whose value is strictly lower; ties flag nobody.
fn lower_side(a: f64, b: f64) -> Option<ChannelSide> {
    if a < b {
        Some(ChannelSide::A)
    } else if b < a {
        Some(ChannelSide::B)
    } else {
        None
    }
}

/// Derive the narrative flags from two analyzed channels.
pub(crate) fn compute_verdict(
    a: &ChannelRetention,
    b: &ChannelRetention,
    config: &AnalysisConfig,
) -> Verdict {
    let higher_volatility = if a.mean_volatility > b.mean_volatility * config.volatility_ratio {
        Some(ChannelSide::A)
    } else if b.mean_volatility > a.mean_volatility * config.volatility_ratio {
        Some(ChannelSide::B)
    } else {
        None
    };

    Verdict {
        faster_decay: lower_side(a.decay_slope, b.decay_slope),
        declining_retention: lower_side(a.retention_change, b.retention_change),
        higher_volatility,
    }
}

/// Compare two channels aligned on their own takeoff years.
///
/// # Arguments
/// * `series_a`, `takeoff_a` - First channel and its takeoff year
/// * `series_b`, `takeoff_b` - Second channel and its takeoff year
/// * `config` - Window sizes and the volatility ratio
pub fn compare(
    series_a: &ChannelSeries,
    takeoff_a: i32,
    series_b: &ChannelSeries,
    takeoff_b: i32,
    config: &AnalysisConfig,
) -> ComparisonReport {
    let channel_a = analyze_retention(series_a, takeoff_a, config);
    let channel_b = analyze_retention(series_b, takeoff_b, config);
    finish_comparison(channel_a, channel_b, config)
}

/// Compare two channels at their detected takeoff years.
///
/// Each detection's issues (fallback to the earliest year) are carried into
/// that channel's `issues`, so they show up in [`ComparisonReport::diagnostics`].
pub fn compare_detected(
    series_a: &ChannelSeries,
    detection_a: &TakeoffDetection,
    series_b: &ChannelSeries,
    detection_b: &TakeoffDetection,
    config: &AnalysisConfig,
) -> ComparisonReport {
    let channel_a =
        analyze_retention_with_issues(series_a, detection_a.year, detection_a.issues.clone(), config);
    let channel_b =
        analyze_retention_with_issues(series_b, detection_b.year, detection_b.issues.clone(), config);
    finish_comparison(channel_a, channel_b, config)
}

fn finish_comparison(
    channel_a: ChannelRetention,
    channel_b: ChannelRetention,
    config: &AnalysisConfig,
) -> ComparisonReport {
    let verdict = compute_verdict(&channel_a, &channel_b, config);

    info!(
        "Compared {} ({}) with {} ({}): {:?}",
        channel_a.name, channel_a.takeoff_year, channel_b.name, channel_b.takeoff_year, verdict
    );

    ComparisonReport {
        channel_a,
        channel_b,
        verdict,
    }
}
