//! Statistical analysis utilities for the aptstat workspace.
//!
//! This crate provides a collection of statistical tools including:
//!
//! - **Descriptive statistics**: Calculate mean, median, variance, skewness, etc.
//! - **Quantiles**: Linearly interpolated quantiles of sorted data
//! - **Box plots**: Quartiles, Tukey fences, whiskers and outliers
//! - **Histogram generation**: Equal-width frequency distributions
//! - **Correlation**: Pearson and Spearman rank correlation
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`quantile`]: Quantile computation
//! - [`boxplot`]: Box plot summaries with IQR-based outlier detection
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`correlation`]: Correlation coefficients and average ranking
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use aptstat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Detecting outliers
//!
//! ```
//! use aptstat_stats::boxplot::BoxPlotSummary;
//!
//! let values = [10.0, 11.0, 12.0, 13.0, 14.0, 95.0];
//! let summary = BoxPlotSummary::new(values).unwrap();
//! assert_eq!(summary.outlier_count(), 1);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use aptstat_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod boxplot;
pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod quantile;
