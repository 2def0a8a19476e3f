//! Calendar bucketing of a channel's videos.
//!
//! Two axes are supported: months since the channel's first upload and months
//! since January 1 of the takeoff year. Buckets are sparse; a month without
//! uploads simply has no entry.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::models::{elapsed_days, month_index, year_start, ChannelSeries};

/// Aggregate of the videos published in one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarBucket {
    /// Month offset from the axis origin, negative before it.
    pub index: i64,
    pub total_views: u64,
    pub video_count: usize,
    pub avg_views_per_video: f64,
}

/// Group records into months relative to `origin`.
pub(crate) fn compute_buckets(
    series: &ChannelSeries,
    origin: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Vec<CalendarBucket> {
    let mut grouped: BTreeMap<i64, (u64, usize)> = BTreeMap::new();

    for record in series {
        let days = elapsed_days(origin, record.published_at);
        let index = month_index(days, config.month_length_days);
        let entry = grouped.entry(index).or_insert((0, 0));
        entry.0 += record.view_count;
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(index, (total_views, video_count))| CalendarBucket {
            index,
            total_views,
            video_count,
            avg_views_per_video: total_views as f64 / video_count as f64,
        })
        .collect()
}

/// Buckets indexed by months since the channel's first upload.
///
/// Indices are always non-negative and the first bucket is 0.
pub fn bucket_by_month_since_start(
    series: &ChannelSeries,
    config: &AnalysisConfig,
) -> Vec<CalendarBucket> {
    let buckets = compute_buckets(series, series.first_published(), config);
    debug!(
        "{}: {} month buckets since start",
        series.name(),
        buckets.len()
    );
    buckets
}

/// Buckets indexed by months since January 1 of `takeoff_year`.
///
/// Videos published before the takeoff year land in negative buckets.
pub fn bucket_by_month_since_takeoff(
    series: &ChannelSeries,
    takeoff_year: i32,
    config: &AnalysisConfig,
) -> Vec<CalendarBucket> {
    let origin = match year_start(takeoff_year) {
        Some(origin) => origin,
        None => return Vec::new(),
    };
    let buckets = compute_buckets(series, origin, config);
    debug!(
        "{}: {} month buckets since takeoff {}",
        series.name(),
        buckets.len(),
        takeoff_year
    );
    buckets
}
