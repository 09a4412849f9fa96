//! JSON reports written by the subcommands.

use std::path::PathBuf;

use aptstat_analysis::{city_summary::CityPriceSummary, regression::OlsFit};
use aptstat_mle::estimator::MleComparison;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MleReport {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub sample: Vec<u64>,
    pub comparison: MleComparison,
}

/// Estimates drawn as vertical markers next to the log-likelihood curve
#[derive(Debug, Clone, Serialize)]
pub struct CurveMarkers {
    pub true_p: Option<f64>,
    pub analytical_p: f64,
    pub numerical_p: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitySummaryReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub cities: Vec<CityPriceSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegressionReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub fit: OlsFit,
}
