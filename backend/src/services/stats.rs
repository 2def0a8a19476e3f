//! Descriptive statistics and least squares over sparse series.
//!
//! All helpers return `None` rather than a coerced zero when the input is too
//! small to define the statistic; callers decide on the sentinel.

use serde::Serialize;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator), `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Median, `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through the defined points of a sparse series.
///
/// Points whose `y` is `None` or non-finite are skipped. Returns `None` when
/// fewer than two points remain or every remaining `x` is identical.
///
/// # Arguments
/// * `points` - `(x, y)` pairs; undefined `y` values are ignored
///
/// # Returns
/// * `Some(LinearFit)` for a well-defined regression
/// * `None` otherwise
pub fn least_squares<I>(points: I) -> Option<LinearFit>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    let defined: Vec<(f64, f64)> = points
        .into_iter()
        .filter_map(|(x, y)| y.filter(|v| v.is_finite()).map(|v| (x, v)))
        .collect();

    if defined.len() < 2 {
        return None;
    }

    let n = defined.len() as f64;
    let mean_x = defined.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = defined.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &defined {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Slope of the least-squares line, or 0 when undefined.
pub fn slope_or_zero<I>(points: I) -> f64
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    least_squares(points).map(|fit| fit.slope).unwrap_or(0.0)
}

/// Linear interpolation of `y` at `x` over points sorted by `x`.
///
/// Values outside the covered range clamp to the first/last `y`.
pub fn interpolate(points: &[(f64, f64)], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x <= first.0 {
        return Some(first.1);
    }
    if x >= last.0 {
        return Some(last.1);
    }

    let upper = points.partition_point(|(px, _)| *px <= x);
    let (x0, y0) = points[upper - 1];
    let (x1, y1) = points[upper];
    if x1 == x0 {
        return Some(y1);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[5.0]), None);
        assert_eq!(sample_std_dev(&[2.0, 2.0, 2.0]), Some(0.0));

        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138089935299395).abs() < 1e-9);
    }

    #[test]
    fn test_least_squares_exact_line() {
        let points = (0..5).map(|i| (i as f64, Some(3.0 * i as f64 - 1.0)));
        let fit = least_squares(points).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-9);
        assert!((fit.intercept + 1.0).abs() < 1e-9);
        assert!((fit.predict(10.0) - 29.0).abs() < 1e-9);
    }

    #[test]
    fn test_least_squares_skips_undefined() {
        let points = vec![
            (0.0, None),
            (1.0, Some(1.0)),
            (2.0, Some(f64::NAN)),
            (3.0, Some(3.0)),
        ];
        let fit = least_squares(points).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_least_squares_degenerate() {
        assert_eq!(least_squares(vec![(1.0, Some(2.0))]), None);
        assert_eq!(least_squares(vec![(1.0, Some(2.0)), (1.0, Some(3.0))]), None);
        assert_eq!(slope_or_zero(Vec::new()), 0.0);
    }

    #[test]
    fn test_interpolate() {
        let points = vec![(0.0, 0.0), (10.0, 100.0), (20.0, 100.0)];
        assert_eq!(interpolate(&points, -5.0), Some(0.0));
        assert_eq!(interpolate(&points, 5.0), Some(50.0));
        assert_eq!(interpolate(&points, 15.0), Some(100.0));
        assert_eq!(interpolate(&points, 25.0), Some(100.0));
        assert_eq!(interpolate(&[], 1.0), None);
    }

    #[test]
    fn test_interpolate_repeated_x_takes_last() {
        let points = vec![(0.0, 0.0), (5.0, 10.0), (5.0, 30.0), (10.0, 40.0)];
        assert_eq!(interpolate(&points, 5.0), Some(30.0));
        assert_eq!(interpolate(&points, 7.5), Some(35.0));
    }
}
