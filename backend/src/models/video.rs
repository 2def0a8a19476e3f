use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    pub fn new(value: impl Into<String>) -> Self {
        VideoId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One published video as fetched from the channel.
///
/// Counts are snapshots taken at fetch time, not lifetime totals. Older videos
/// have simply had longer to accumulate views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "video_id", alias = "id")]
    pub id: VideoId,
    #[serde(default)]
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>, published_at: DateTime<Utc>, view_count: u64) -> Self {
        Self {
            id: VideoId::new(id),
            title: String::new(),
            published_at,
            view_count,
            like_count: 0,
            comment_count: 0,
        }
    }

    /// Set like and comment counts.
    pub fn with_engagement(mut self, like_count: u64, comment_count: u64) -> Self {
        self.like_count = like_count;
        self.comment_count = comment_count;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Calendar year (UTC) the video was published in.
    pub fn year(&self) -> i32 {
        self.published_at.year()
    }

    /// `(likes + comments) / views * 100`, or `None` for a video without views.
    pub fn engagement_rate(&self) -> Option<f64> {
        if self.view_count == 0 {
            return None;
        }
        Some((self.like_count + self.comment_count) as f64 / self.view_count as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_engagement_rate() {
        let video = VideoRecord::new("v1", ts(2020, 1, 1), 1000).with_engagement(40, 10);
        assert_eq!(video.engagement_rate(), Some(5.0));
    }

    #[test]
    fn test_engagement_rate_zero_views() {
        let video = VideoRecord::new("v1", ts(2020, 1, 1), 0).with_engagement(3, 1);
        assert_eq!(video.engagement_rate(), None);
    }

    #[test]
    fn test_year() {
        let video = VideoRecord::new("v1", ts(2019, 12, 31), 10);
        assert_eq!(video.year(), 2019);
    }

    #[test]
    fn test_deserialize_export_row() {
        let json = r#"{
            "video_id": "abc123",
            "title": "Breakdown",
            "published_at": "2021-03-04T15:00:00Z",
            "duration": "PT10M",
            "view_count": 1500,
            "like_count": 90,
            "comment_count": 12,
            "fetched_at": "2024-01-01T00:00:00"
        }"#;

        let video: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(video.id, VideoId::new("abc123"));
        assert_eq!(video.title, "Breakdown");
        assert_eq!(video.view_count, 1500);
        assert_eq!(video.like_count, 90);
        assert_eq!(video.comment_count, 12);
        assert_eq!(video.year(), 2021);
    }

    #[test]
    fn test_deserialize_minimal_with_id_alias() {
        let json = r#"{"id": "x", "published_at": "2020-01-01T00:00:00Z", "view_count": 5}"#;
        let video: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(video.id.as_str(), "x");
        assert_eq!(video.like_count, 0);
        assert_eq!(video.comment_count, 0);
        assert!(video.title.is_empty());
    }
}
