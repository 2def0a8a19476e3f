//! Single-channel and two-channel entry points.
//!
//! These validate the configuration, run every analysis over one immutable
//! series, and gather the per-metric issues into a flat diagnostics list.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::checksum::calculate_fingerprint;
use crate::config::AnalysisConfig;
use crate::error::{AnalyticsResult, MetricIssue};
use crate::models::{ChannelSeries, VideoRecord};
use crate::services::alignment::{
    bucket_by_month_since_start, bucket_by_month_since_takeoff, CalendarBucket,
};
use crate::services::engagement::{
    analyze_engagement, upload_frequency, EngagementAnalysis, UploadFrequency,
};
use crate::services::growth_decay::{analyze, GrowthDecayAnalysis};
use crate::services::mean_reversion::{analyze_mean_reversion, MeanReversionAnalysis};
use crate::services::retention::{compare_detected, ComparisonReport};
use crate::services::rolling::{compute_rolling_series, RollingSeries};
use crate::services::summary::{summarize, top_videos, ChannelSummary};
use crate::services::takeoff::{detect_takeoff, TakeoffDetection};

/// Everything computed for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub summary: ChannelSummary,
    pub takeoff: TakeoffDetection,
    /// Takeoff year the decay analyses were anchored at (may be an override).
    pub takeoff_year: i32,
    pub buckets: Vec<CalendarBucket>,
    pub growth_decay: GrowthDecayAnalysis,
    pub rolling: RollingSeries,
    pub engagement: EngagementAnalysis,
    pub upload_frequency: UploadFrequency,
    pub top_videos: Vec<VideoRecord>,
    pub mean_reversion: MeanReversionAnalysis,
    pub fingerprint: String,
    pub diagnostics: Vec<MetricIssue>,
}

/// Analyze a channel with its detected takeoff year.
pub fn analyze_channel(
    series: &ChannelSeries,
    as_of: DateTime<Utc>,
    config: &AnalysisConfig,
) -> AnalyticsResult<ChannelReport> {
    analyze_channel_with_takeoff(series, None, as_of, config)
}

/// Analyze a channel, optionally anchoring the decay analyses at a given year.
///
/// # Arguments
/// * `series` - Validated channel records
/// * `takeoff_override` - Year to use instead of the detected takeoff year
/// * `as_of` - Reference time for the recent-activity window
/// * `config` - Analysis constants, validated before use
///
/// # Returns
/// * `Ok(ChannelReport)` with undefined metrics listed in `diagnostics`
/// * `Err(AnalyticsError)` if the configuration is invalid
pub fn analyze_channel_with_takeoff(
    series: &ChannelSeries,
    takeoff_override: Option<i32>,
    as_of: DateTime<Utc>,
    config: &AnalysisConfig,
) -> AnalyticsResult<ChannelReport> {
    config.validate()?;

    let takeoff = detect_takeoff(series);
    let takeoff_year = takeoff_override.unwrap_or(takeoff.year);

    let buckets = bucket_by_month_since_start(series, config);
    let takeoff_buckets = bucket_by_month_since_takeoff(series, takeoff_year, config);

    let growth_decay = analyze(series, takeoff_year, config);
    let rolling = compute_rolling_series(&buckets, config);
    for issue in &rolling.issues {
        warn!("{}: {}", series.name(), issue);
    }
    let engagement = analyze_engagement(series, config);
    let upload_frequency = upload_frequency(&buckets);
    let mean_reversion = analyze_mean_reversion(&takeoff_buckets, config);

    let mut diagnostics = Vec::new();
    if takeoff_override.is_none() {
        diagnostics.extend(takeoff.issues.iter().cloned());
    }
    diagnostics.extend(growth_decay.issues.iter().cloned());
    diagnostics.extend(rolling.issues.iter().cloned());

    info!(
        "Analyzed {}: {} videos, takeoff {}, {} diagnostics",
        series.name(),
        series.len(),
        takeoff_year,
        diagnostics.len()
    );

    Ok(ChannelReport {
        summary: summarize(series, as_of, config),
        takeoff,
        takeoff_year,
        buckets,
        growth_decay,
        rolling,
        engagement,
        upload_frequency,
        top_videos: top_videos(series, config.top_videos),
        mean_reversion,
        fingerprint: calculate_fingerprint(series),
        diagnostics,
    })
}

/// Compare two channels, each aligned on its own detected takeoff year.
pub fn compare_channels(
    series_a: &ChannelSeries,
    series_b: &ChannelSeries,
    config: &AnalysisConfig,
) -> AnalyticsResult<ComparisonReport> {
    config.validate()?;

    let takeoff_a = detect_takeoff(series_a);
    let takeoff_b = detect_takeoff(series_b);
    Ok(compare_detected(series_a, &takeoff_a, series_b, &takeoff_b, config))
}
