use std::ops::Range;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range `[min, max]` into bins of equal width and
/// counts the frequency of values falling into each bin.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin of a histogram also contains its end value.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `num_bins` - The number of bins to create.
    ///
    /// # Returns
    ///
    /// A `Histogram` with bins populated based on the input values. The histogram has
    /// no bins if `values` is empty or `num_bins` is zero. A dataset whose values are
    /// all equal gets a single bin of unit width centered on that value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use aptstat_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.bins[0].range, 1.0..4.0);
    /// assert_eq!(histogram.bins.iter().map(|b| b.count).sum::<u64>(), 10);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max - min <= 0.0 {
            // Edge case: distribution is concentrated at a single value
            return Self {
                bins: vec![HistogramBin {
                    range: (min - 0.5)..(min + 0.5),
                    count: values.len() as u64,
                }],
            };
        }

        let width = (max - min) / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|idx| {
                // Recompute each edge from `min` to avoid floating-point accumulation errors
                let start = min + idx as f64 * width;
                let end = if idx + 1 == num_bins {
                    max
                } else {
                    min + (idx + 1) as f64 * width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        // Bins are contiguous, so the first bin ending above `value` holds it.
        // The maximum sits on the last bin's end and is counted there.
        for value in values {
            let idx = bins
                .partition_point(|bin| bin.range.end <= value)
                .min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted in the histogram.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
