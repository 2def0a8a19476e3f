use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::video::VideoRecord;
use crate::error::{AnalyticsError, AnalyticsResult};

/// A channel's videos, sorted ascending by publish time.
///
/// Construction enforces the invariants every computation relies on: the
/// series is non-empty and no video id appears twice. Ties in `published_at`
/// are broken by id so cumulative sums are deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSeries {
    name: String,
    records: Vec<VideoRecord>,
}

impl ChannelSeries {
    /// Validate and sort a channel's records.
    ///
    /// # Arguments
    /// * `name` - Channel name used in reports and errors
    /// * `records` - Records in any order
    ///
    /// # Returns
    /// * `Ok(ChannelSeries)` sorted by `(published_at, id)`
    /// * `Err(AnalyticsError)` for an empty input or a duplicate id
    pub fn new(name: impl Into<String>, mut records: Vec<VideoRecord>) -> AnalyticsResult<Self> {
        let name = name.into();
        if records.is_empty() {
            return Err(AnalyticsError::empty_series(name));
        }

        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                if !seen.insert(record.id.as_str()) {
                    return Err(AnalyticsError::duplicate_video_id(
                        name,
                        record.id.as_str(),
                    ));
                }
            }
        }

        records.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self { name, records })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    /// Publish time of the earliest video.
    pub fn first_published(&self) -> DateTime<Utc> {
        self.records[0].published_at
    }

    /// Publish time of the latest video.
    pub fn last_published(&self) -> DateTime<Utc> {
        self.records[self.records.len() - 1].published_at
    }

    pub fn total_views(&self) -> u64 {
        self.records.iter().map(|r| r.view_count).sum()
    }
}

impl<'a> IntoIterator for &'a ChannelSeries {
    type Item = &'a VideoRecord;
    type IntoIter = std::slice::Iter<'a, VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
