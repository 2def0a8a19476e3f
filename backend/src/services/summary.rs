//! Headline channel statistics and top performers.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::models::{elapsed_days, ChannelSeries, VideoRecord};
use crate::services::stats::{mean, median};

/// Uploads inside the trailing window ending at `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub window_days: i64,
    pub videos: usize,
    pub views: u64,
}

/// Summary statistics snapshot for a channel.
///
/// # Fields
///
/// * `total_videos` - Number of videos in the series
/// * `total_views` / `total_likes` / `total_comments` - Sums over all videos
/// * `mean_views` / `median_views` - Per-video view statistics
/// * `months_active` - Span between first and last upload in average months
/// * `avg_uploads_per_month` - `total_videos / months_active`, 0 for a zero span
/// * `recent` - Uploads within `recent_days` of the report date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub total_videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub mean_views: f64,
    pub median_views: f64,
    pub first_published: DateTime<Utc>,
    pub last_published: DateTime<Utc>,
    pub months_active: f64,
    pub avg_uploads_per_month: f64,
    pub recent: RecentActivity,
}

/// Compute the summary snapshot of `series` as seen on `as_of`.
pub fn summarize(
    series: &ChannelSeries,
    as_of: DateTime<Utc>,
    config: &AnalysisConfig,
) -> ChannelSummary {
    let views: Vec<f64> = series.iter().map(|r| r.view_count as f64).collect();

    let span_days = elapsed_days(series.first_published(), series.last_published());
    let months_active = span_days as f64 / config.month_length_days;
    let avg_uploads_per_month = if months_active > 0.0 {
        series.len() as f64 / months_active
    } else {
        0.0
    };

    let cutoff = as_of - Duration::days(config.recent_days);
    let (recent_videos, recent_views) = series
        .iter()
        .filter(|r| r.published_at >= cutoff)
        .fold((0usize, 0u64), |(count, views), r| {
            (count + 1, views + r.view_count)
        });

    ChannelSummary {
        name: series.name().to_string(),
        total_videos: series.len(),
        total_views: series.total_views(),
        total_likes: series.iter().map(|r| r.like_count).sum(),
        total_comments: series.iter().map(|r| r.comment_count).sum(),
        mean_views: mean(&views).unwrap_or(0.0),
        median_views: median(&views).unwrap_or(0.0),
        first_published: series.first_published(),
        last_published: series.last_published(),
        months_active,
        avg_uploads_per_month,
        recent: RecentActivity {
            window_days: config.recent_days,
            videos: recent_videos,
            views: recent_views,
        },
    }
}

/// The `n` most viewed videos, ties resolved by earlier publish time.
pub fn top_videos(series: &ChannelSeries, n: usize) -> Vec<VideoRecord> {
    let mut ranked: Vec<&VideoRecord> = series.iter().collect();
    ranked.sort_by(|a, b| {
        b.view_count
            .cmp(&a.view_count)
            .then_with(|| a.published_at.cmp(&b.published_at))
    });
    ranked.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_series() -> ChannelSeries {
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        ChannelSeries::new(
            "summary",
            vec![
                VideoRecord::new("a", at(2023, 1, 1), 100).with_engagement(10, 1),
                VideoRecord::new("b", at(2023, 3, 2), 400).with_engagement(20, 2),
                VideoRecord::new("c", at(2023, 12, 20), 400).with_engagement(30, 3),
                VideoRecord::new("d", at(2024, 1, 10), 50).with_engagement(5, 0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_summarize_totals() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let summary = summarize(&create_test_series(), as_of, &AnalysisConfig::default());

        assert_eq!(summary.total_videos, 4);
        assert_eq!(summary.total_views, 950);
        assert_eq!(summary.total_likes, 65);
        assert_eq!(summary.total_comments, 6);
        assert_eq!(summary.mean_views, 237.5);
        assert_eq!(summary.median_views, 250.0);
    }

    #[test]
    fn test_uploads_per_month() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let summary = summarize(&create_test_series(), as_of, &AnalysisConfig::default());

        // 374 days between first and last upload
        let months = 374.0 / 30.44;
        assert!((summary.months_active - months).abs() < 1e-9);
        assert!((summary.avg_uploads_per_month - 4.0 / months).abs() < 1e-9);
    }

    #[test]
    fn test_recent_window() {
        let as_of = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let summary = summarize(&create_test_series(), as_of, &AnalysisConfig::default());

        assert_eq!(summary.recent.window_days, 30);
        assert_eq!(summary.recent.videos, 2);
        assert_eq!(summary.recent.views, 450);
    }

    #[test]
    fn test_single_video_zero_span() {
        let series = ChannelSeries::new(
            "one",
            vec![VideoRecord::new(
                "a",
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                10,
            )],
        )
        .unwrap();
        let summary = summarize(&series, Utc::now(), &AnalysisConfig::default());
        assert_eq!(summary.months_active, 0.0);
        assert_eq!(summary.avg_uploads_per_month, 0.0);
    }

    #[test]
    fn test_top_videos_ties_by_publish_time() {
        let top = top_videos(&create_test_series(), 3);
        let ids: Vec<&str> = top.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        assert_eq!(top_videos(&create_test_series(), 10).len(), 4);
        assert!(top_videos(&create_test_series(), 0).is_empty());
    }
}
