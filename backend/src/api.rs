//! Public API surface for the analytics crate.
//!
//! This file consolidates the report types consumed by the plotting
//! collaborator. All types derive `Serialize`; undefined metrics serialize
//! as `null`.

pub use crate::error::MetricIssue;
pub use crate::models::ChannelSeries;
pub use crate::models::VideoId;
pub use crate::models::VideoRecord;
pub use crate::services::alignment::CalendarBucket;
pub use crate::services::engagement::EngagementAnalysis;
pub use crate::services::engagement::EngagementPoint;
pub use crate::services::engagement::UploadBucket;
pub use crate::services::engagement::UploadFrequency;
pub use crate::services::growth_decay::CurvePoint;
pub use crate::services::growth_decay::ExtrapolationAnchor;
pub use crate::services::growth_decay::ExtrapolationSample;
pub use crate::services::growth_decay::GrowthDecayAnalysis;
pub use crate::services::mean_reversion::MeanReversionAnalysis;
pub use crate::services::mean_reversion::ProjectionPoint;
pub use crate::services::mean_reversion::TrendDirection;
pub use crate::services::pipeline::ChannelReport;
pub use crate::services::retention::ChannelRetention;
pub use crate::services::retention::ChannelSide;
pub use crate::services::retention::ComparisonReport;
pub use crate::services::retention::RetentionPoint;
pub use crate::services::retention::Verdict;
pub use crate::services::rolling::RollingPoint;
pub use crate::services::rolling::RollingSeries;
pub use crate::services::stats::LinearFit;
pub use crate::services::summary::ChannelSummary;
pub use crate::services::summary::RecentActivity;
pub use crate::services::takeoff::TakeoffDetection;
pub use crate::services::takeoff::YearlyTotal;

use serde::Serialize;

/// JSON document written by `--json` for a single channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReportDocument<'a> {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub config: &'a crate::config::AnalysisConfig,
    pub report: &'a ChannelReport,
}

/// JSON document written by `--json` for a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReportDocument<'a> {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub config: &'a crate::config::AnalysisConfig,
    pub report: &'a ComparisonReport,
    pub key_findings: Vec<String>,
}
