//! Analytics services.
//!
//! Each module is a set of pure functions over an immutable
//! [`ChannelSeries`](crate::models::ChannelSeries). Data flows one way:
//! alignment feeds takeoff detection, growth decay and rolling statistics,
//! which in turn feed the two-channel retention comparison. [`pipeline`]
//! wires them together for a whole report.

pub mod alignment;
pub mod engagement;
pub mod growth_decay;
pub mod mean_reversion;
pub mod pipeline;
pub mod retention;
pub mod rolling;
pub mod stats;
pub mod summary;
pub mod takeoff;


pub use alignment::{bucket_by_month_since_start, bucket_by_month_since_takeoff, CalendarBucket};
pub use engagement::{analyze_engagement, upload_frequency, EngagementAnalysis, UploadFrequency};
pub use growth_decay::{analyze, GrowthDecayAnalysis};
pub use mean_reversion::{analyze_mean_reversion, MeanReversionAnalysis, TrendDirection};
pub use pipeline::{analyze_channel, analyze_channel_with_takeoff, compare_channels, ChannelReport};
pub use retention::{
    compare, compare_detected, ChannelRetention, ChannelSide, ComparisonReport, Verdict};
pub use rolling::{
    compute_rolling_series, rolling_growth, rolling_trend, rolling_volatility, trend_slope,
    RollingSeries,
};
pub use summary::{summarize, top_videos, ChannelSummary};
pub use takeoff::{detect_takeoff, detect_takeoff_year, TakeoffDetection};
