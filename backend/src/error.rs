//! Error types for the analytics pipeline.
//!
//! Two kinds of failure exist. [`AnalyticsError`] is fatal and is returned
//! before any bucketing happens (empty input, duplicate ids, bad config).
//! [`MetricIssue`] is local to a single metric: the metric falls back to a
//! documented sentinel and the issue is attached to the report's diagnostics.

use serde::Serialize;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Fatal error type, rejected at the entry point.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The series for a channel contains no records.
    #[error("Empty series: channel '{channel}' has no videos")]
    EmptySeries { channel: String },

    /// The same video id appears more than once in one channel.
    #[error("Duplicate video id '{video_id}' in channel '{channel}'")]
    DuplicateVideoId { channel: String, video_id: String },

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AnalyticsError {
    /// Create an empty-series error for a channel.
    pub fn empty_series(channel: impl Into<String>) -> Self {
        Self::EmptySeries {
            channel: channel.into(),
        }
    }

    /// Create a duplicate-id error.
    pub fn duplicate_video_id(channel: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self::DuplicateVideoId {
            channel: channel.into(),
            video_id: video_id.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

/// Non-fatal problem with one metric of one channel.
///
/// The affected metric still has a value (a sentinel); the issue explains
/// where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricIssue {
    /// Not enough history to compute the metric.
    #[error("insufficient data for {metric}: need {required}, have {available}")]
    InsufficientData {
        metric: &'static str,
        required: usize,
        available: usize,
    },

    /// A ratio had a zero or missing denominator.
    #[error("degenerate baseline for {metric}, using {fallback}")]
    DegenerateBaseline { metric: &'static str, fallback: f64 },

    /// A statistic had too few points to be defined.
    #[error("undefined statistic {metric}")]
    UndefinedStatistic { metric: &'static str },
}

impl MetricIssue {
    pub fn insufficient(metric: &'static str, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            metric,
            required,
            available,
        }
    }

    pub fn degenerate(metric: &'static str, fallback: f64) -> Self {
        Self::DegenerateBaseline { metric, fallback }
    }

    pub fn undefined(metric: &'static str) -> Self {
        Self::UndefinedStatistic { metric }
    }

    /// Name of the metric this issue applies to.
    pub fn metric(&self) -> &'static str {
        match self {
            Self::InsufficientData { metric, .. }
            | Self::DegenerateBaseline { metric, .. }
            | Self::UndefinedStatistic { metric } => *metric,
        }
    }
}
