//! Engagement rate and upload cadence per since-start month.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::models::{elapsed_days, month_index, ChannelSeries};
use crate::services::alignment::CalendarBucket;
use crate::services::rolling::rolling_growth;
use crate::services::stats::mean;

/// Mean engagement rate of one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementPoint {
    pub index: i64,
    /// Mean of `(likes + comments) / views * 100` over the bucket's videos.
    pub mean_rate: f64,
    /// Videos that contributed (videos without views are excluded).
    pub video_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementAnalysis {
    pub monthly: Vec<EngagementPoint>,
    /// Mean of the monthly means.
    pub overall_mean: Option<f64>,
    /// Month-over-month change of the monthly mean rate, in percent.
    pub growth: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UploadBucket {
    pub index: i64,
    pub video_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadFrequency {
    pub monthly: Vec<UploadBucket>,
    /// Mean uploads per month that had any upload.
    pub mean_per_bucket: f64,
}

pub fn analyze_engagement(series: &ChannelSeries, config: &AnalysisConfig) -> EngagementAnalysis {
    let origin = series.first_published();
    let mut grouped: BTreeMap<i64, Vec<f64>> = BTreeMap::new();

    for record in series {
        if let Some(rate) = record.engagement_rate() {
            let index = month_index(
                elapsed_days(origin, record.published_at),
                config.month_length_days,
            );
            grouped.entry(index).or_default().push(rate);
        }
    }

    let monthly: Vec<EngagementPoint> = grouped
        .into_iter()
        .filter_map(|(index, rates)| {
            mean(&rates).map(|mean_rate| EngagementPoint {
                index,
                mean_rate,
                video_count: rates.len(),
            })
        })
        .collect();

    let rates: Vec<f64> = monthly.iter().map(|p| p.mean_rate).collect();

    EngagementAnalysis {
        overall_mean: mean(&rates),
        growth: rolling_growth(&rates),
        monthly,
    }
}

/// Upload counts from since-start buckets.
pub fn upload_frequency(buckets: &[CalendarBucket]) -> UploadFrequency {
    let monthly: Vec<UploadBucket> = buckets
        .iter()
        .map(|b| UploadBucket {
            index: b.index,
            video_count: b.video_count,
        })
        .collect();
    let counts: Vec<f64> = monthly.iter().map(|b| b.video_count as f64).collect();

    UploadFrequency {
        mean_per_bucket: mean(&counts).unwrap_or(0.0),
        monthly,
    }
}
