//! Shared builders for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use channel_growth::models::{ChannelSeries, VideoRecord};

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn video(id: &str, year: i32, month: u32, day: u32, views: u64) -> VideoRecord {
    VideoRecord::new(id, at(year, month, day), views)
}

/// Publish time of the `k`-th monthly upload, 15 days into average month `k`
/// counted from January 1 of `start_year`.
///
/// Rounding the month start up keeps upload `k` in since-start bucket `k`.
pub fn monthly_publish_time(start_year: i32, k: usize) -> DateTime<Utc> {
    let day = (30.44 * k as f64).ceil() as i64 + 15;
    at(start_year, 1, 1) + Duration::days(day)
}

/// One video per month starting January `start_year`.
pub fn monthly_series(name: &str, start_year: i32, monthly_views: &[u64]) -> ChannelSeries {
    let records = monthly_views
        .iter()
        .enumerate()
        .map(|(k, views)| {
            VideoRecord::new(
                format!("{}-{:03}", name, k),
                monthly_publish_time(start_year, k),
                *views,
            )
            .with_engagement(views / 20, views / 200)
        })
        .collect();
    ChannelSeries::new(name, records).unwrap()
}

/// Twelve monthly uploads per year with the given per-video views for each year.
pub fn yearly_steps(per_video_views: &[u64]) -> Vec<u64> {
    per_video_views
        .iter()
        .flat_map(|v| std::iter::repeat(*v).take(12))
        .collect()
}
