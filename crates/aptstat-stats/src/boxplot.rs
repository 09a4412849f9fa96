use crate::quantile::quantile_sorted;

/// Multiplier applied to the interquartile range to place the outlier fences.
pub const TUKEY_FENCE_FACTOR: f64 = 1.5;

/// Five-number summary with Tukey fences, as drawn by a box plot.
///
/// Quartiles use linear interpolation (see [`quantile_sorted`]). Values strictly
/// outside `[lower_fence, upper_fence]` are outliers; the whiskers extend to the
/// most extreme values that are still inside the fences.
///
/// # Examples
///
/// ```
/// use aptstat_stats::boxplot::BoxPlotSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
/// let summary = BoxPlotSummary::new(values).unwrap();
/// assert_eq!(summary.median, 3.5);
/// assert_eq!(summary.outliers, vec![100.0]);
/// assert_eq!(summary.upper_whisker, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct BoxPlotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// `q3 - q1`
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`
    pub lower_fence: f64,
    /// `q3 + 1.5 * iqr`
    pub upper_fence: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values outside the fences, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Computes the summary from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from pre-sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let q1 = quantile_sorted(sorted_values, 0.25);
        let median = quantile_sorted(sorted_values, 0.5);
        let q3 = quantile_sorted(sorted_values, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - TUKEY_FENCE_FACTOR * iqr;
        let upper_fence = q3 + TUKEY_FENCE_FACTOR * iqr;

        let is_inside = |v: f64| lower_fence <= v && v <= upper_fence;
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|&v| !is_inside(v))
            .collect();

        // The quartiles always lie inside the fences, so at least one value does too
        let lower_whisker = sorted_values
            .iter()
            .copied()
            .find(|&v| is_inside(v))
            .unwrap_or(q1);
        let upper_whisker = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|&v| is_inside(v))
            .unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Number of values outside the fences.
    #[must_use]
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }
}
