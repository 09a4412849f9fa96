//! Apartment price analysis.
//!
//! This crate turns an apartment sales table into the summaries a price
//! analysis needs. It builds on the generic statistics of `aptstat-stats`.
//!
//! # Workflow
//!
//! 1. **Load** ([`dataset::ApartmentDataset`]): read a CSV file with a header
//!    row. Cells may be empty; each analysis drops the records that miss one
//!    of its own columns.
//! 2. **Summarize** ([`city_summary::summarize_by_city`]): per-city price
//!    quartiles, Tukey fences, outlier counts and skewness.
//! 3. **Correlate** ([`correlation::CorrelationMatrix`]): Spearman rank
//!    correlation between price, area, bedrooms and floor.
//! 4. **Regress** ([`regression::Design`]): ordinary least squares of price on
//!    area, bedrooms and dummy-encoded city and district.
//!
//! # Example
//!
//! ```
//! use aptstat_analysis::{
//!     city_summary, correlation::CorrelationMatrix, dataset::{ApartmentDataset, NumericColumn},
//! };
//!
//! let csv = "\
//! price,area_m2,bedrooms,floor,city
//! 300000,40,1,2,Lodz
//! 450000,60,2,4,Lodz
//! 700000,75,3,1,Warsaw
//! ";
//! let dataset = ApartmentDataset::from_reader(csv.as_bytes())?;
//!
//! let summaries = city_summary::summarize_by_city(&dataset);
//! assert_eq!(summaries.len(), 2);
//! assert_eq!(summaries[0].city, "Lodz");
//! assert_eq!(summaries[0].median, 375_000.0);
//!
//! let matrix = CorrelationMatrix::spearman(&dataset, &NumericColumn::ALL);
//! assert_eq!(matrix.get("price", "area_m2"), Some(1.0));
//! # Ok::<(), aptstat_analysis::dataset::DatasetError>(())
//! ```

pub mod city_summary;
pub mod correlation;
pub mod dataset;
pub mod regression;
