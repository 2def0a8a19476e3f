//! Channel Growth command-line entry point
//!
//! Loads exported video records, runs the analytics pipeline and prints a
//! text report (or JSON with `--json`) to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Single channel
//! channel-growth analyze videos.csv --name @channel
//!
//! # Two channels aligned on their own takeoff years
//! channel-growth compare a.csv b.json --name1 @a --name2 @b --json
//! ```
//!
//! # Environment Variables
//!
//! - `CHANNEL_GROWTH_CONFIG`: Path to an `analysis.toml` (same as `--config`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use channel_growth::api::{ChannelReportDocument, ComparisonReportDocument};
use channel_growth::config::{AnalysisConfig, ConfigFile};
use channel_growth::io::RecordLoader;
use channel_growth::models::ChannelSeries;
use channel_growth::report::{key_findings, render_channel_report, render_comparison_report};
use channel_growth::services::{analyze_channel_with_takeoff, compare_channels};

#[derive(Parser)]
#[command(name = "channel-growth")]
#[command(about = "Growth-decay and retention analytics for YouTube channels")]
#[command(version)]
struct Cli {
    /// Analysis configuration file (TOML with an [analysis] table)
    #[arg(long, global = true, env = "CHANNEL_GROWTH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single channel export
    Analyze {
        /// CSV or JSON export of the channel's videos
        file: PathBuf,
        /// Channel name shown in the report (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Anchor the decay analysis at this year instead of the detected one
        #[arg(long)]
        takeoff_year: Option<i32>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two channel exports
    Compare {
        file1: PathBuf,
        file2: PathBuf,
        #[arg(long)]
        name1: Option<String>,
        #[arg(long)]
        name2: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let file = ConfigFile::from_file(path)?;
            info!("Loaded configuration from {}", path.display());
            Ok(file.analysis)
        }
        None => match ConfigFile::from_default_location()? {
            Some((file, found_at)) => {
                info!("Loaded configuration from {}", found_at.display());
                Ok(file.analysis)
            }
            None => Ok(AnalysisConfig::default()),
        },
    }
}

fn load_series(path: &Path, name: Option<String>) -> anyhow::Result<ChannelSeries> {
    let loaded = RecordLoader::load_from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!("Loaded {} videos from {}", loaded.num_records, path.display());

    let name = name.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("channel")
            .to_string()
    });
    Ok(ChannelSeries::new(name, loaded.records)?)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            file,
            name,
            takeoff_year,
            json,
        } => {
            let series = load_series(&file, name)?;
            let now = Utc::now();
            let report = analyze_channel_with_takeoff(&series, takeoff_year, now, &config)?;

            if json {
                let doc = ChannelReportDocument {
                    generated_at: now,
                    config: &config,
                    report: &report,
                };
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", render_channel_report(&report));
            }
        }
        Commands::Compare {
            file1,
            file2,
            name1,
            name2,
            json,
        } => {
            let series_a = load_series(&file1, name1)?;
            let series_b = load_series(&file2, name2)?;
            let report = compare_channels(&series_a, &series_b, &config)?;

            if json {
                let doc = ComparisonReportDocument {
                    generated_at: Utc::now(),
                    config: &config,
                    key_findings: key_findings(&report),
                    report: &report,
                };
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", render_comparison_report(&report, &config));
            }
        }
    }

    Ok(())
}
