//! Takeoff-year detection.
//!
//! The takeoff year is the calendar year with the largest year-over-year
//! growth in total views. Growth is measured against the previous year that
//! has any uploads, so gap years do not produce a zero denominator.

use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::MetricIssue;
use crate::models::ChannelSeries;

/// Total views of the videos published in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total_views: u64,
    pub video_count: usize,
    /// Fractional change against the previous present year.
    pub yoy_growth: Option<f64>,
}

/// Outcome of takeoff detection, including the data that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeoffDetection {
    pub year: i32,
    /// Winning year-over-year growth as a fraction; `None` on fallback.
    pub growth: Option<f64>,
    pub yearly_totals: Vec<YearlyTotal>,
    pub issues: Vec<MetricIssue>,
}

impl TakeoffDetection {
    /// `true` when the year came from the earliest-year fallback.
    pub fn is_fallback(&self) -> bool {
        self.growth.is_none()
    }
}

/// Group view totals by calendar year and compute each year's change.
pub(crate) fn compute_yearly_totals(series: &ChannelSeries) -> Vec<YearlyTotal> {
    let mut grouped: BTreeMap<i32, (u64, usize)> = BTreeMap::new();
    for record in series {
        let entry = grouped.entry(record.year()).or_insert((0, 0));
        entry.0 += record.view_count;
        entry.1 += 1;
    }

    let mut totals = Vec::with_capacity(grouped.len());
    let mut previous: Option<u64> = None;
    for (year, (total_views, video_count)) in grouped {
        let yoy_growth = match previous {
            Some(prev) if prev > 0 => Some((total_views as f64 - prev as f64) / prev as f64),
            _ => None,
        };
        totals.push(YearlyTotal {
            year,
            total_views,
            video_count,
            yoy_growth,
        });
        previous = Some(total_views);
    }
    totals
}

/// Detect the takeoff year with its supporting yearly totals.
///
/// Ties between equal growth values go to the earliest year. With fewer than
/// two years, or when no change is defined, the earliest year is returned.
pub fn detect_takeoff(series: &ChannelSeries) -> TakeoffDetection {
    let yearly_totals = compute_yearly_totals(series);
    let mut issues = Vec::new();

    let mut best: Option<(i32, f64)> = None;
    for total in &yearly_totals {
        if let Some(growth) = total.yoy_growth {
            match best {
                Some((_, best_growth)) if growth <= best_growth => {}
                _ => best = Some((total.year, growth)),
            }
        }
    }

    // compute_yearly_totals always yields at least one year for a valid series
    let min_year = yearly_totals
        .first()
        .map(|t| t.year)
        .unwrap_or_else(|| series.records()[0].year());

    let (year, growth) = match best {
        Some((year, growth)) => (year, Some(growth)),
        None => {
            let issue = if yearly_totals.len() < 2 {
                MetricIssue::insufficient("takeoff_year", 2, yearly_totals.len())
            } else {
                MetricIssue::degenerate("takeoff_year", min_year as f64)
            };
            warn!("{}: {}", series.name(), issue);
            issues.push(issue);
            (min_year, None)
        }
    };

    debug!(
        "{}: takeoff year {} (growth {:?}) over {} years",
        series.name(),
        year,
        growth,
        yearly_totals.len()
    );

    TakeoffDetection {
        year,
        growth,
        yearly_totals,
        issues,
    }
}

/// The calendar year of peak year-over-year view growth.
pub fn detect_takeoff_year(series: &ChannelSeries) -> i32 {
    detect_takeoff(series).year
}
