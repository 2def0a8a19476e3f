//! Fixed-width text reports.
//!
//! The comparison table uses a 40-column label and two 20-column values, with
//! thousands separators on counts. Undefined metrics print as `n/a`.

use std::fmt;

use crate::config::AnalysisConfig;
use crate::services::pipeline::ChannelReport;
use crate::services::retention::{ChannelRetention, ComparisonReport};

const RULE_WIDTH: usize = 80;
const NOT_AVAILABLE: &str = "n/a";

/// Integer with `,` thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Float rounded to the nearest integer, with thousands separators.
pub fn format_rounded(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = value.round();
    let formatted = format_count(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn format_pct(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", precision, v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

struct ChannelReportText<'a> {
    report: &'a ChannelReport,
}

impl fmt::Display for ChannelReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let summary = &report.summary;

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "CHANNEL REPORT: {}", summary.name)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "Date range: {} to {}",
            summary.first_published.format("%Y-%m-%d"),
            summary.last_published.format("%Y-%m-%d")
        )?;
        writeln!(f, "Dataset fingerprint: {}", report.fingerprint)?;

        heading(f, "SUMMARY")?;
        writeln!(f, "{:<40} {}", "Total Videos", format_count(summary.total_videos as u64))?;
        writeln!(f, "{:<40} {}", "Total Views", format_count(summary.total_views))?;
        writeln!(f, "{:<40} {}", "Total Likes", format_count(summary.total_likes))?;
        writeln!(f, "{:<40} {}", "Total Comments", format_count(summary.total_comments))?;
        writeln!(f, "{:<40} {}", "Average Views per Video", format_rounded(summary.mean_views))?;
        writeln!(f, "{:<40} {}", "Median Views per Video", format_rounded(summary.median_views))?;
        writeln!(f, "{:<40} {:.1}", "Average Uploads per Month", summary.avg_uploads_per_month)?;
        writeln!(
            f,
            "{:<40} {} videos, {} views",
            format!("Last {} Days", summary.recent.window_days),
            summary.recent.videos,
            format_count(summary.recent.views)
        )?;

        heading(f, "TAKEOFF ANALYSIS")?;
        match report.takeoff.growth {
            Some(growth) => writeln!(
                f,
                "{:<40} {} ({:+.1}% YoY)",
                "Identified Takeoff Year",
                report.takeoff.year,
                growth * 100.0
            )?,
            None => writeln!(
                f,
                "{:<40} {} (earliest year, no growth defined)",
                "Identified Takeoff Year", report.takeoff.year
            )?,
        }
        if report.takeoff_year != report.takeoff.year {
            writeln!(f, "{:<40} {}", "Takeoff Year Used", report.takeoff_year)?;
        }
        for total in &report.takeoff.yearly_totals {
            writeln!(
                f,
                "  {:<6} {:>16} views {:>6} videos {:>12}",
                total.year,
                format_count(total.total_views),
                total.video_count,
                format_pct(total.yoy_growth.map(|g| g * 100.0), 1)
            )?;
        }

        let decay = &report.growth_decay;
        heading(f, "GROWTH DECAY ANALYSIS")?;
        match decay.anchor {
            Some(anchor) => {
                writeln!(
                    f,
                    "{:<40} day {}, {} views",
                    "Extrapolation Anchor",
                    anchor.days,
                    format_count(anchor.cumulative_views)
                )?;
                writeln!(
                    f,
                    "{:<40} {:.1}%",
                    "Takeoff-Year Growth Rate",
                    anchor.growth_rate * 100.0
                )?;
            }
            None => writeln!(f, "{:<40} {}", "Extrapolation Anchor", NOT_AVAILABLE)?,
        }
        writeln!(f, "{:<40} {}", "Actual Cumulative Views", format_rounded(decay.actual_final()))?;
        writeln!(
            f,
            "{:<40} {}",
            "Extrapolated Cumulative Views",
            decay
                .extrapolated_final()
                .map(format_rounded)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        writeln!(f, "{:<40} {}", "Extrapolation Gap", format_pct(decay.gap_pct, 1))?;
        writeln!(
            f,
            "{:<40} {:.3}",
            "Growth Rate Decay Slope (%/month)", report.rolling.decay_slope
        )?;
        writeln!(
            f,
            "{:<40} {:.1}",
            "Average Growth Volatility (Std Dev %)", report.rolling.mean_volatility
        )?;

        let reversion = &report.mean_reversion;
        heading(f, "MEAN REVERSION")?;
        writeln!(f, "{:<40} {}", "Mean Growth (Takeoff Period)", format_pct(reversion.early_mean, 1))?;
        writeln!(f, "{:<40} {}", "Mean Growth (After Takeoff)", format_pct(reversion.later_mean, 1))?;
        writeln!(
            f,
            "{:<40} {}",
            "Views per Video Trend",
            reversion
                .direction
                .map(|d| d.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        writeln!(f, "{:<40} {:.1}%", "Median Monthly Growth", reversion.median_growth * 100.0)?;

        heading(f, "ENGAGEMENT")?;
        writeln!(
            f,
            "{:<40} {}",
            "Overall Avg Engagement Rate",
            format_pct(report.engagement.overall_mean, 2)
        )?;
        writeln!(
            f,
            "{:<40} {:.1}",
            "Avg Uploads per Active Month", report.upload_frequency.mean_per_bucket
        )?;

        heading(f, &format!("TOP {} VIDEOS", report.top_videos.len()))?;
        for (rank, video) in report.top_videos.iter().enumerate() {
            let title = if video.title.is_empty() {
                video.id.as_str()
            } else {
                video.title.as_str()
            };
            writeln!(
                f,
                "{:>3}. {:<56} {:>16}",
                rank + 1,
                truncate(title, 50),
                format_count(video.view_count)
            )?;
        }

        if !report.diagnostics.is_empty() {
            heading(f, "DIAGNOSTICS")?;
            for issue in &report.diagnostics {
                writeln!(f, "- {}", issue)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

fn truncate(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let head: String = title.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

fn both<F>(a: &ChannelRetention, b: &ChannelRetention, metric: F) -> (String, String)
where
    F: Fn(&ChannelRetention) -> String,
{
    (metric(a), metric(b))
}

struct ComparisonReportText<'a> {
    report: &'a ComparisonReport,
    config: &'a AnalysisConfig,
}

impl ComparisonReportText<'_> {
    fn row(f: &mut fmt::Formatter<'_>, label: &str, a: String, b: String) -> fmt::Result {
        writeln!(f, "{:<40} {:<20} {:<20}", label, a, b)
    }
}

impl fmt::Display for ComparisonReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.report.channel_a;
        let b = &self.report.channel_b;
        let window = self.config.retention_window;

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "CHANNEL COMPARISON REPORT")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        Self::row(f, "METRIC", a.name.clone(), b.name.clone())?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;

        let (va, vb) = both(a, b, |c| format_count(c.total_videos as u64));
        Self::row(f, "Total Videos", va, vb)?;
        let (va, vb) = both(a, b, |c| format_count(c.total_views));
        Self::row(f, "Total Views", va, vb)?;
        let (va, vb) = both(a, b, |c| format_rounded(c.mean_views_per_video));
        Self::row(f, "Average Views per Video", va, vb)?;
        let (va, vb) = both(a, b, |c| format_rounded(c.median_views_per_video));
        Self::row(f, "Median Views per Video", va, vb)?;

        heading(f, "TAKEOFF ANALYSIS")?;
        let (va, vb) = both(a, b, |c| c.takeoff_year.to_string());
        Self::row(f, "Identified Takeoff Year", va, vb)?;
        let (va, vb) = both(a, b, |c| format_count(c.post_takeoff_videos as u64));
        Self::row(f, "Videos Post-Takeoff", va, vb)?;
        let (va, vb) = both(a, b, |c| {
            c.post_takeoff_mean_views
                .map(format_rounded)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        });
        Self::row(f, "Avg Views Post-Takeoff", va, vb)?;

        heading(f, "RETENTION ANALYSIS")?;
        let (va, vb) = both(a, b, |c| format!("{:.1}%", c.retention_change));
        Self::row(
            f,
            &format!("Views/Video Change (First {w}mo vs Last {w}mo)", w = window),
            va,
            vb,
        )?;

        heading(f, "GROWTH DECAY ANALYSIS")?;
        let (va, vb) = both(a, b, |c| format!("{:.3}", c.decay_slope));
        Self::row(f, "Growth Rate Decay Slope (%/month)", va, vb)?;
        let (va, vb) = both(a, b, |c| format_pct(c.early_growth, 1));
        Self::row(
            f,
            &format!(
                "Avg Early Growth (first {}mo post-takeoff)",
                self.config.early_growth_months
            ),
            va,
            vb,
        )?;
        let (va, vb) = both(a, b, |c| format_pct(c.recent_growth, 1));
        Self::row(f, &format!("Avg Recent Growth (last {}mo)", window), va, vb)?;

        heading(f, "STABILITY METRICS")?;
        let (va, vb) = both(a, b, |c| format!("{:.1}", c.mean_volatility));
        Self::row(f, "Average Growth Volatility (Std Dev %)", va, vb)?;
        let interpretation = |this: f64, other: f64| {
            if this > other {
                "Higher volatility".to_string()
            } else {
                "Lower volatility".to_string()
            }
        };
        Self::row(
            f,
            "Interpretation",
            interpretation(a.mean_volatility, b.mean_volatility),
            interpretation(b.mean_volatility, a.mean_volatility),
        )?;

        writeln!(f)?;
        writeln!(f, "KEY FINDINGS")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        for finding in key_findings(self.report) {
            writeln!(f, "- {}", finding)?;
        }

        let diagnostics = self.report.diagnostics();
        if !diagnostics.is_empty() {
            heading(f, "DIAGNOSTICS")?;
            for (name, issue) in diagnostics {
                writeln!(f, "- {}: {}", name, issue)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

/// One sentence per raised verdict flag.
///
/// Exact ties raise no flag, so neither channel is named for a metric the two
/// share; with no flag raised the single finding says so.
pub fn key_findings(report: &ComparisonReport) -> Vec<String> {
    let verdict = &report.verdict;
    let mut findings = Vec::new();

    if let Some(side) = verdict.faster_decay {
        let (this, other) = (report.channel(side), report.channel(side.other()));
        findings.push(format!(
            "{} shows faster growth decay ({:.3}%/mo vs {:.3}%/mo)",
            this.name, this.decay_slope, other.decay_slope
        ));
    }
    if let Some(side) = verdict.declining_retention {
        let (this, other) = (report.channel(side), report.channel(side.other()));
        findings.push(format!(
            "{} has declining retention ({:.1}% change), {} is more stable ({:.1}% change)",
            this.name, this.retention_change, other.name, other.retention_change
        ));
    }
    if let Some(side) = verdict.higher_volatility {
        findings.push(format!(
            "{} shows significantly higher volatility (less sustainable)",
            report.channel(side).name
        ));
    }
    if findings.is_empty() {
        findings.push("No differences in decay, retention or volatility".to_string());
    }
    findings
}

/// Render the single-channel text report.
pub fn render_channel_report(report: &ChannelReport) -> String {
    ChannelReportText { report }.to_string()
}

/// Render the two-channel comparison table with its key findings.
pub fn render_comparison_report(report: &ComparisonReport, config: &AnalysisConfig) -> String {
    ComparisonReportText { report, config }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelSeries, VideoRecord};
    use crate::services::retention::compare;
    use chrono::{Duration, TimeZone, Utc};

    fn create_series(name: &str, views: &[u64]) -> ChannelSeries {
        let origin = Utc.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap();
        let records = views
            .iter()
            .enumerate()
            .map(|(k, v)| {
                VideoRecord::new(format!("{}-{}", name, k), origin + Duration::days(31 * k as i64), *v)
            })
            .collect();
        ChannelSeries::new(name, records).unwrap()
    }

    #[test]
    fn test_tied_channels_flag_nobody() {
        let config = AnalysisConfig::default();
        let views = [100, 150, 120, 180, 160, 200, 190, 210];
        let report = compare(
            &create_series("first", &views),
            2020,
            &create_series("second", &views),
            2020,
            &config,
        );

        assert_eq!(report.verdict.faster_decay, None);
        assert_eq!(report.verdict.declining_retention, None);
        assert_eq!(report.verdict.higher_volatility, None);
        assert_eq!(
            key_findings(&report),
            vec!["No differences in decay, retention or volatility".to_string()]
        );

        let text = render_comparison_report(&report, &config);
        assert!(!text.contains("faster growth decay"));
        assert!(!text.contains("has declining retention"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(100000), "100,000");
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(1234.6), "1,235");
        assert_eq!(format_rounded(-98765.4), "-98,765");
        assert_eq!(format_rounded(0.4), "0");
        assert_eq!(format_rounded(f64::NAN), "n/a");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(Some(12.345), 1), "12.3%");
        assert_eq!(format_pct(None, 1), "n/a");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }
}
