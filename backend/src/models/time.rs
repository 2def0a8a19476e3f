//! Day and month arithmetic shared by the bucketing and curve code.

use chrono::{DateTime, TimeZone, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from `origin` to `at`, floored (negative when `at` is earlier).
pub fn elapsed_days(origin: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    (at - origin).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Month bucket for a day offset: `floor(days / month_length_days)`.
pub fn month_index(days: i64, month_length_days: f64) -> i64 {
    (days as f64 / month_length_days).floor() as i64
}

/// January 1 of `year`, 00:00 UTC.
///
/// Returns `None` only for years chrono cannot represent.
pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// Fractional years between two day offsets.
pub fn years_between(from_day: f64, to_day: f64, days_per_year: f64) -> f64 {
    (to_day - from_day) / days_per_year
}
