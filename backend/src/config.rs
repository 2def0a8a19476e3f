//! Analysis configuration.
//!
//! Every constant that shapes report output is a named value here so reports
//! can be tested against boundary values directly. Values can be overridden
//! from an `[analysis]` table in a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Average month length used for month bucketing.
pub const DEFAULT_MONTH_LENGTH_DAYS: f64 = 30.44;

/// Trailing window (current + 5 prior buckets) for rolling statistics.
pub const DEFAULT_ROLLING_WINDOW: usize = 6;

/// Ratio above which one channel's volatility is flagged as significantly higher.
pub const DEFAULT_VOLATILITY_RATIO: f64 = 1.5;

/// Number of buckets at each end used for retention change.
pub const DEFAULT_RETENTION_WINDOW: usize = 12;

/// Number of samples on the extrapolation curve.
pub const DEFAULT_EXTRAPOLATION_POINTS: usize = 100;

/// Year length used by the compound-growth extrapolation.
pub const DEFAULT_DAYS_PER_YEAR: f64 = 365.25;

/// Number of videos listed as top performers.
pub const DEFAULT_TOP_VIDEOS: usize = 15;

/// Size of the "recent uploads" window in the channel summary.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// Months since takeoff still counted as the early (takeoff) period.
pub const DEFAULT_EARLY_PERIOD_MONTHS: i64 = 24;

/// Last month since takeoff included in the "early growth" average.
pub const DEFAULT_EARLY_GROWTH_MONTHS: i64 = 12;

fn default_month_length_days() -> f64 {
    DEFAULT_MONTH_LENGTH_DAYS
}

fn default_rolling_window() -> usize {
    DEFAULT_ROLLING_WINDOW
}

fn default_volatility_ratio() -> f64 {
    DEFAULT_VOLATILITY_RATIO
}

fn default_retention_window() -> usize {
    DEFAULT_RETENTION_WINDOW
}

fn default_extrapolation_points() -> usize {
    DEFAULT_EXTRAPOLATION_POINTS
}

fn default_days_per_year() -> f64 {
    DEFAULT_DAYS_PER_YEAR
}

fn default_top_videos() -> usize {
    DEFAULT_TOP_VIDEOS
}

fn default_recent_days() -> i64 {
    DEFAULT_RECENT_DAYS
}

fn default_early_period_months() -> i64 {
    DEFAULT_EARLY_PERIOD_MONTHS
}

fn default_early_growth_months() -> i64 {
    DEFAULT_EARLY_GROWTH_MONTHS
}

/// Tunable constants of the analytics pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_month_length_days")]
    pub month_length_days: f64,
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,
    #[serde(default = "default_volatility_ratio")]
    pub volatility_ratio: f64,
    #[serde(default = "default_retention_window")]
    pub retention_window: usize,
    #[serde(default = "default_extrapolation_points")]
    pub extrapolation_points: usize,
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
    #[serde(default = "default_top_videos")]
    pub top_videos: usize,
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,
    #[serde(default = "default_early_period_months")]
    pub early_period_months: i64,
    #[serde(default = "default_early_growth_months")]
    pub early_growth_months: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            month_length_days: DEFAULT_MONTH_LENGTH_DAYS,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            volatility_ratio: DEFAULT_VOLATILITY_RATIO,
            retention_window: DEFAULT_RETENTION_WINDOW,
            extrapolation_points: DEFAULT_EXTRAPOLATION_POINTS,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
            top_videos: DEFAULT_TOP_VIDEOS,
            recent_days: DEFAULT_RECENT_DAYS,
            early_period_months: DEFAULT_EARLY_PERIOD_MONTHS,
            early_growth_months: DEFAULT_EARLY_GROWTH_MONTHS,
        }
    }
}

impl AnalysisConfig {
    /// Minimum bucket count for a retention change (one more than the window).
    pub fn retention_min_buckets(&self) -> usize {
        self.retention_window + 1
    }

    /// Reject values that would make the pipeline divide by zero or loop on nothing.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.month_length_days > 0.0) || !self.month_length_days.is_finite() {
            return Err(AnalyticsError::configuration(format!(
                "month_length_days must be positive, got {}",
                self.month_length_days
            )));
        }
        if !(self.days_per_year > 0.0) || !self.days_per_year.is_finite() {
            return Err(AnalyticsError::configuration(format!(
                "days_per_year must be positive, got {}",
                self.days_per_year
            )));
        }
        if self.rolling_window == 0 {
            return Err(AnalyticsError::configuration(
                "rolling_window must be at least 1",
            ));
        }
        if self.retention_window == 0 {
            return Err(AnalyticsError::configuration(
                "retention_window must be at least 1",
            ));
        }
        if !(self.volatility_ratio >= 1.0) {
            return Err(AnalyticsError::configuration(format!(
                "volatility_ratio must be >= 1.0, got {}",
                self.volatility_ratio
            )));
        }
        if self.extrapolation_points < 2 {
            return Err(AnalyticsError::configuration(
                "extrapolation_points must be at least 2",
            ));
        }
        if self.recent_days < 0 {
            return Err(AnalyticsError::configuration(
                "recent_days must not be negative",
            ));
        }
        Ok(())
    }
}

/// Contents of an `analysis.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl ConfigFile {
    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        let config: ConfigFile = toml::from_str(content).map_err(|e| {
            AnalyticsError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ConfigFile)` if successful
    /// * `Err(AnalyticsError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalyticsError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `analysis.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns the parsed file together with the path it was found at, or
    /// `Ok(None)` when no file exists in any of them.
    pub fn from_default_location() -> AnalyticsResult<Option<(Self, PathBuf)>> {
        let search_paths = [
            PathBuf::from("analysis.toml"),
            PathBuf::from("backend/analysis.toml"),
            PathBuf::from("../analysis.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok(Some((config, path)));
            }
        }

        Ok(None)
    }
}
