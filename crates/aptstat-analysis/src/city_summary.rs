//! Per-city price distribution summary.

use aptstat_stats::{boxplot::BoxPlotSummary, descriptive::DescriptiveStats};
use serde::Serialize;

use crate::dataset::ApartmentDataset;

/// Price distribution of one city.
///
/// Quartiles use linear interpolation; outliers are prices strictly outside
/// `[lower_fence, upper_fence]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityPriceSummary {
    pub city: String,
    pub count: usize,
    /// Adjusted Fisher-Pearson skewness, `None` for fewer than three prices.
    pub skewness: Option<f64>,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub outlier_count: usize,
    pub min: f64,
    pub max: f64,
}

impl CityPriceSummary {
    /// Summarizes the prices of one city.
    ///
    /// Returns `None` if `prices` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use aptstat_analysis::city_summary::CityPriceSummary;
    ///
    /// let summary = CityPriceSummary::from_prices("Gdansk", &[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.iqr, 2.0);
    /// assert_eq!(summary.outlier_count, 1);
    /// ```
    #[must_use]
    pub fn from_prices(city: &str, prices: &[f64]) -> Option<Self> {
        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted)?;
        let boxplot = BoxPlotSummary::from_sorted(&sorted)?;
        Some(Self {
            city: city.to_owned(),
            count: stats.count,
            skewness: stats.skewness,
            q1: boxplot.q1,
            median: boxplot.median,
            q3: boxplot.q3,
            iqr: boxplot.iqr,
            lower_fence: boxplot.lower_fence,
            upper_fence: boxplot.upper_fence,
            outlier_count: boxplot.outlier_count(),
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Summarizes prices for every city of `dataset`, sorted by city name.
///
/// Records without a city or a price are skipped.
#[must_use]
pub fn summarize_by_city(dataset: &ApartmentDataset) -> Vec<CityPriceSummary> {
    dataset
        .prices_by_city()
        .iter()
        .filter_map(|(city, prices)| CityPriceSummary::from_prices(city, prices))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ApartmentRecord;

    fn record(city: &str, price: Option<f64>) -> ApartmentRecord {
        ApartmentRecord {
            price,
            city: Some(city.to_owned()),
            ..ApartmentRecord::default()
        }
    }

    #[test]
    fn test_from_prices_quartiles_and_fences() {
        let summary = CityPriceSummary::from_prices("A", &[100.0, 4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.lower_fence, -1.0);
        assert_eq!(summary.upper_fence, 7.0);
        assert_eq!(summary.outlier_count, 1);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert!(summary.skewness.unwrap() > 2.0);
    }

    #[test]
    fn test_from_prices_small_groups() {
        assert!(CityPriceSummary::from_prices("A", &[]).is_none());
        let single = CityPriceSummary::from_prices("A", &[7.0]).unwrap();
        assert_eq!(single.count, 1);
        assert_eq!(single.skewness, None);
        assert_eq!(single.iqr, 0.0);
        assert_eq!(single.outlier_count, 0);
    }

    #[test]
    fn test_summarize_by_city_sorts_and_filters() {
        let dataset = ApartmentDataset::new(vec![
            record("Warsaw", Some(10.0)),
            record("Bialystok", Some(3.0)),
            record("Warsaw", None),
            record("Warsaw", Some(20.0)),
            ApartmentRecord {
                price: Some(1.0),
                ..ApartmentRecord::default()
            },
        ]);
        let summaries = summarize_by_city(&dataset);
        let cities = summaries.iter().map(|s| s.city.as_str()).collect::<Vec<_>>();
        assert_eq!(cities, ["Bialystok", "Warsaw"]);
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].median, 15.0);
    }

    #[test]
    fn test_summary_serializes_missing_skewness_as_null() {
        let summary = CityPriceSummary::from_prices("A", &[1.0, 2.0]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["skewness"].is_null());
        assert_eq!(json["city"], "A");
    }
}
