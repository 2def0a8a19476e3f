//! # Channel Growth
//!
//! Growth-decay and retention analytics for YouTube channels.
//!
//! This crate takes already-fetched public video metadata for a channel and
//! computes descriptive analytics: when the channel took off, how far a naive
//! compound-growth extrapolation from that year overshoots what actually
//! happened, how month-over-month growth trends and fluctuates, and how two
//! channels compare once aligned on their own takeoff years.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Video records, validated channel series and time helpers
//! - [`services`]: Pure analytics functions (alignment, takeoff, decay, rolling, retention)
//! - [`report`]: Fixed-width text rendering of reports
//! - [`io`]: CSV/JSON export loaders
//! - [`config`]: Named analysis constants, overridable from `analysis.toml`
//! - [`api`]: Serializable report types for chart generation
//!
//! ## Example
//!
//! ```no_run
//! use channel_growth::config::AnalysisConfig;
//! use channel_growth::io::RecordLoader;
//! use channel_growth::models::ChannelSeries;
//! use channel_growth::services::analyze_channel;
//! use std::path::Path;
//!
//! let loaded = RecordLoader::load_from_file(Path::new("videos.csv")).unwrap();
//! let series = ChannelSeries::new("@channel", loaded.records).unwrap();
//! let report = analyze_channel(&series, chrono::Utc::now(), &AnalysisConfig::default()).unwrap();
//! println!("takeoff year: {}", report.takeoff_year);
//! ```

pub mod api;
pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod services;


pub use config::AnalysisConfig;
pub use error::{AnalyticsError, AnalyticsResult, MetricIssue};
