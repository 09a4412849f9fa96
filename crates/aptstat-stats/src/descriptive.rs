use crate::quantile;

/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency, dispersion,
/// and shape for a dataset of `f64` values.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (linearly interpolated for even counts).
    pub median: f64,
    /// The sample variance of the dataset (`n - 1` denominator, `0.0` for a single value).
    pub variance: f64,
    /// The sample standard deviation of the dataset.
    pub std_dev: f64,
    /// The adjusted Fisher-Pearson skewness (`G1`).
    ///
    /// `None` if the dataset has fewer than three values.
    pub skewness: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. The values will be collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use aptstat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.skewness, Some(0.0));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use aptstat_stats::descriptive::DescriptiveStats;
    /// let mut values = [5.0, 2.0, 4.0, 1.0, 3.0, 6.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 6.0);
    /// assert_eq!(stats.median, 3.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = quantile::quantile_sorted(sorted_values, 0.5);

        let sum_sq = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        let variance = if count > 1 { sum_sq / (n - 1.0) } else { 0.0 };
        let std_dev = variance.sqrt();

        let skewness = skewness_about(sorted_values, mean);

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
            skewness,
        })
    }
}

/// Adjusted Fisher-Pearson skewness `G1 = g1 * sqrt(n(n-1)) / (n-2)`.
///
/// Returns `Some(0.0)` for a constant dataset and `None` for fewer than three values.
#[expect(clippy::cast_precision_loss)]
fn skewness_about(values: &[f64], mean: f64) -> Option<f64> {
    let count = values.len();
    if count < 3 {
        return None;
    }
    let n = count as f64;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;
    // Relative threshold so that round-off around a constant value reads as zero spread
    if m2 <= (f64::EPSILON * mean.abs()).powi(2) {
        return Some(0.0);
    }
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.skewness, None);
    }

    #[test]
    fn test_sample_variance() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Sum of squared deviations is 32, divided by n - 1 = 7
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_matches_adjusted_formula() {
        // m2 = 12.5, m3 = 45, G1 = 45 / 12.5^1.5 * sqrt(12) / 2
        let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 10.0]).unwrap();
        let skew = stats.skewness.unwrap();
        assert!((skew - 1.763_632_614_8).abs() < 1e-8, "skew = {skew}");
    }

    #[test]
    fn test_skewness_sign() {
        let right = DescriptiveStats::new([1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
        let left = DescriptiveStats::new([-10.0, -2.0, -1.0, -1.0, -1.0]).unwrap();
        assert!(right.skewness.unwrap() > 0.0);
        assert!(left.skewness.unwrap() < 0.0);
    }

    #[test]
    fn test_constant_values_have_zero_skewness() {
        let stats = DescriptiveStats::new([3.0; 5]).unwrap();
        assert_eq!(stats.skewness, Some(0.0));
        assert_eq!(stats.std_dev, 0.0);
    }
}
