//! Descriptive statistics over `f64` samples.
//!
//! All functions return `None` for empty input rather than a misleading
//! numeric value. Sorting uses `f64::total_cmp`, so NaN values sort last;
//! callers are expected to filter non-finite samples first.
//!
//! # Percentiles
//!
//! [`percentile_sorted`] uses linear interpolation between closest ranks
//! (Hyndman & Fan type 7, NumPy's default `linear` method):
//!
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```

use serde::{Deserialize, Serialize};

/// z-score of the two-sided 95% normal confidence interval.
pub const Z_95: f64 = 1.96;

/// Arithmetic mean.
///
/// # Examples
/// ```
/// use econ_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of an unsorted sample (average of the two middle values for even counts).
///
/// # Examples
/// ```
/// use econ_core::math::statistics::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (N−1 denominator).
///
/// Returns `Some(0.0)` for a single observation and `None` for an empty sample.
///
/// # Examples
/// ```
/// use econ_core::math::statistics::sample_std_dev;
///
/// assert_eq!(sample_std_dev(&[5.0]), Some(0.0));
/// let s = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((s - 2.138089935).abs() < 1e-9);
/// ```
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Returns a copy of `values` sorted ascending.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile of an already sorted sample.
///
/// `p` is a fraction in `[0, 1]` and is clamped into that range.
///
/// # Examples
/// ```
/// use econ_core::math::statistics::percentile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&sorted, 0.5), Some(2.5));
/// assert_eq!(percentile_sorted(&sorted, 0.0), Some(1.0));
/// assert_eq!(percentile_sorted(&sorted, 1.0), Some(4.0));
/// ```
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Two-sided 95% confidence interval for the mean, `mean ± 1.96·s/√n`.
///
/// Collapses to `(mean, mean)` when `n <= 1`.
pub fn confidence_interval_95(mean: f64, std_dev: f64, n: usize) -> (f64, f64) {
    if n <= 1 {
        return (mean, mean);
    }
    let half_width = Z_95 * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Ordinary least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Value at `x = 0`
    pub intercept: f64,
    /// Change in `y` per unit of `x`
    pub slope: f64,
}

impl LinearFit {
    /// Fit a line through paired observations.
    ///
    /// Returns `None` when fewer than two points are given, lengths differ,
    /// or all `x` values coincide.
    ///
    /// # Examples
    /// ```
    /// use econ_core::math::statistics::LinearFit;
    ///
    /// let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
    /// assert!((fit.slope - 2.0).abs() < 1e-12);
    /// assert!((fit.intercept - 1.0).abs() < 1e-12);
    /// ```
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let mx = mean(xs)?;
        let my = mean(ys)?;
        let sxx: f64 = xs.iter().map(|x| (x - mx) * (x - mx)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
        let slope = sxy / sxx;
        Some(Self {
            intercept: my - slope * mx,
            slope,
        })
    }

    /// Evaluate the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Summary statistics of a sample, computed in one pass over a sorted copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (N−1)
    pub std_dev: f64,
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
    /// Sorted observations, kept for percentile queries
    #[serde(skip)]
    sorted: Vec<f64>,
}

impl SampleSummary {
    /// Summarise a sample. Returns `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = sample_std_dev(values)?;
        let sorted = sorted_copy(values);
        Some(Self {
            count: values.len(),
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            sorted,
        })
    }

    /// Interpolated percentile, `p` in `[0, 1]`.
    pub fn percentile(&self, p: f64) -> f64 {
        percentile_sorted(&self.sorted, p).unwrap_or(self.mean)
    }
}
