//! Two-channel scenario: a channel that explodes and then tapers against one
//! whose cumulative views keep doubling every year.

mod support;

use channel_growth::config::AnalysisConfig;
use channel_growth::error::MetricIssue;
use channel_growth::report::{key_findings, render_comparison_report};
use channel_growth::services::{
    analyze, bucket_by_month_since_takeoff, compare, compare_channels, detect_takeoff,
    ChannelSide,
};
use support::{monthly_series, yearly_steps};

fn tapering_channel() -> channel_growth::models::ChannelSeries {
    // yearly totals 1200, 4800, 3600, 960
    monthly_series("tapering", 2019, &yearly_steps(&[100, 400, 300, 80]))
}

fn steady_channel() -> channel_growth::models::ChannelSeries {
    // cumulative 1200, 2400, 4800, 9600
    monthly_series("steady", 2019, &yearly_steps(&[100, 100, 200, 400]))
}

#[test]
fn test_takeoff_years() {
    let a = detect_takeoff(&tapering_channel());
    assert_eq!(a.year, 2020);
    assert!((a.growth.unwrap() - 3.0).abs() < 1e-9);

    // 2021 and 2022 both double; the earliest wins
    let b = detect_takeoff(&steady_channel());
    assert_eq!(b.year, 2021);
}

#[test]
fn test_gap_large_for_tapering_and_near_zero_for_steady() {
    let config = AnalysisConfig::default();

    let a = analyze(&tapering_channel(), 2020, &config);
    let anchor = a.anchor.unwrap();
    assert_eq!(anchor.cumulative_views, 6000);
    assert!((anchor.growth_rate - 4.0).abs() < 1e-12);
    assert!(a.gap_pct.unwrap() > 1000.0);

    let b = analyze(&steady_channel(), 2021, &config);
    assert!((b.anchor.unwrap().growth_rate - 1.0).abs() < 1e-12);
    assert!(b.gap_pct.unwrap().abs() < 0.1);
}

#[test]
fn test_tapering_channel_flagged_for_declining_retention() {
    let config = AnalysisConfig::default();
    let report = compare_channels(&tapering_channel(), &steady_channel(), &config).unwrap();

    assert!((report.channel_a.retention_change + 20.0).abs() < 1e-9);
    assert!((report.channel_b.retention_change - 300.0).abs() < 1e-9);
    assert_eq!(report.verdict.declining_retention, Some(ChannelSide::A));

    let findings = key_findings(&report);
    assert!(findings
        .iter()
        .any(|f| f.starts_with("tapering has declining retention")));
}

#[test]
fn test_aligned_buckets_cover_both_histories() {
    let config = AnalysisConfig::default();
    let a = bucket_by_month_since_takeoff(&tapering_channel(), 2020, &config);
    let b = bucket_by_month_since_takeoff(&steady_channel(), 2021, &config);

    assert_eq!(a.len(), 48);
    assert_eq!(a.first().unwrap().index, -12);
    assert_eq!(a.last().unwrap().index, 35);
    assert_eq!(b.first().unwrap().index, -24);
    assert_eq!(b.last().unwrap().index, 23);
}

#[test]
fn test_comparison_report_text() {
    let config = AnalysisConfig::default();
    let report = compare_channels(&tapering_channel(), &steady_channel(), &config).unwrap();
    let text = render_comparison_report(&report, &config);

    assert!(text.contains("CHANNEL COMPARISON REPORT"));
    assert!(text.contains("KEY FINDINGS"));
    assert!(text.contains(&format!("{:<40} {:<20} {:<20}", "Total Videos", "48", "48")));
    assert!(text.contains(&format!(
        "{:<40} {:<20} {:<20}",
        "Total Views", "10,560", "9,600"
    )));
    assert!(text.contains("Views/Video Change (First 12mo vs Last 12mo)"));
}

#[test]
fn test_short_monthly_scenario_has_no_retention_change() {
    // six months inside one year: no year-over-year growth to detect
    let config = AnalysisConfig::default();
    let a = monthly_series("a", 2023, &[100, 150, 225, 300, 320, 330]);
    let b = monthly_series("b", 2023, &[100, 110, 120, 135, 150, 170]);

    let report = compare_channels(&a, &b, &config).unwrap();
    assert_eq!(report.channel_a.takeoff_year, 2023);
    assert_eq!(report.channel_a.retention_change, 0.0);
    assert_eq!(report.channel_b.retention_change, 0.0);
    assert_eq!(report.verdict.declining_retention, None);
    assert!(report
        .channel_a
        .issues
        .contains(&MetricIssue::insufficient("retention_change", 13, 6)));

    // A's growth decays while B's holds
    assert_eq!(report.verdict.faster_decay, Some(ChannelSide::A));
}

#[test]
fn test_short_monthly_scenario_reports_takeoff_fallback() {
    let config = AnalysisConfig::default();
    let a = monthly_series("a", 2023, &[100, 150, 225, 300, 320, 330]);
    let b = monthly_series("b", 2023, &[100, 110, 120, 135, 150, 170]);
    let fallback = MetricIssue::insufficient("takeoff_year", 2, 1);
    assert_eq!(detect_takeoff(&a).issues, vec![fallback.clone()]);

    let report = compare_channels(&a, &b, &config).unwrap();
    assert!(report.channel_a.issues.contains(&fallback));
    assert!(report.channel_b.issues.contains(&fallback));

    let takeoff_diagnostics: Vec<String> = report
        .diagnostics()
        .into_iter()
        .filter(|(_, issue)| issue.metric() == "takeoff_year")
        .map(|(name, _)| name)
        .collect();
    assert_eq!(takeoff_diagnostics, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_compare_with_explicit_takeoff_years() {
    let config = AnalysisConfig::default();
    let report = compare(&tapering_channel(), 2019, &steady_channel(), 2019, &config);
    assert_eq!(report.channel_a.takeoff_year, 2019);
    assert_eq!(report.channel_a.buckets.first().unwrap().index, 0);
}
