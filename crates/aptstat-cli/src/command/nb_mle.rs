//! Negative binomial maximum-likelihood command
//!
//! Generates a seeded sample of trial counts, estimates the success
//! probability analytically and numerically, and reports both side by side.

use std::path::{Path, PathBuf};

use anyhow::Context;
use aptstat_mle::{
    curve::{CurveGrid, LogLikelihoodCurve},
    estimator::{
        DEFAULT_LOWER_BOUND, DEFAULT_MAX_ITERS, DEFAULT_UPPER_BOUND, MleComparison,
        NumericalMleOptions, SearchBounds,
    },
    sampling::NegativeBinomialTrials,
};
use chrono::Utc;

use crate::{
    report::{CurveMarkers, MleReport},
    util,
};

const DEFAULT_SEED: u64 = 123;
const DEFAULT_SAMPLE_SIZE: usize = 50;
const DEFAULT_SUCCESSES: u64 = 3;
const DEFAULT_TRUE_P: f64 = 0.4;

const CURVE_CSV_FILE: &str = "negative_binomial_loglik.csv";
const CURVE_MARKERS_FILE: &str = "negative_binomial_loglik.json";

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub(crate) struct NbMleArg {
    /// Seed of the sample generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Number of observations to generate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    /// Number of successes each observation waits for (k)
    #[arg(long, default_value_t = DEFAULT_SUCCESSES)]
    successes: u64,
    /// Success probability the sample is generated with
    #[arg(long, default_value_t = DEFAULT_TRUE_P)]
    true_p: f64,
    /// Lower end of the numerical search interval
    #[arg(long, default_value_t = DEFAULT_LOWER_BOUND)]
    lower: f64,
    /// Upper end of the numerical search interval
    #[arg(long, default_value_t = DEFAULT_UPPER_BOUND)]
    upper: f64,
    /// Iteration budget of the numerical optimizer
    #[arg(long, default_value_t = DEFAULT_MAX_ITERS)]
    max_iters: u64,
    /// Output directory for the log-likelihood curve CSV and estimate markers
    #[arg(long)]
    curve_output: Option<PathBuf>,
    /// Output file path for the JSON report
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for NbMleArg {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            sample_size: DEFAULT_SAMPLE_SIZE,
            successes: DEFAULT_SUCCESSES,
            true_p: DEFAULT_TRUE_P,
            lower: DEFAULT_LOWER_BOUND,
            upper: DEFAULT_UPPER_BOUND,
            max_iters: DEFAULT_MAX_ITERS,
            curve_output: None,
            output: None,
        }
    }
}

pub(crate) fn run(arg: &NbMleArg) -> anyhow::Result<()> {
    let NbMleArg {
        seed,
        sample_size,
        successes,
        true_p,
        lower,
        upper,
        max_iters,
        curve_output,
        output,
    } = arg;

    let trials = NegativeBinomialTrials::new(*successes, *true_p)
        .context("Invalid sample generator parameters")?;
    let options = NumericalMleOptions {
        bounds: SearchBounds::new(*lower, *upper).context("Invalid search bounds")?,
        max_iters: *max_iters,
    };

    eprintln!(
        "Generating {sample_size} observations (k = {successes}, p = {true_p}, seed = {seed})..."
    );
    let sample = trials.sample_seeded(*sample_size, *seed);

    eprintln!("Computing maximum-likelihood estimates...");
    let comparison = MleComparison::compute(&sample, *successes, Some(*true_p), &options)
        .context("Failed to estimate the success probability")?;
    eprintln!("Estimates computed");

    print_comparison(&comparison);

    if let Some(dir) = curve_output {
        save_curve(dir, &sample, &comparison)?;
    }

    if let Some(path) = output {
        let report = MleReport {
            generated_at: Utc::now(),
            seed: *seed,
            sample,
            comparison,
        };
        util::write_json_file(path, &report)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_comparison(comparison: &MleComparison) {
    let MleComparison {
        successes,
        sample_size,
        mean_trials,
        true_p,
        analytical,
        numerical,
        bounds,
        absolute_difference,
    } = comparison;

    println!("Negative Binomial MLE (k = {successes}, n = {sample_size})");
    println!("==========================================\n");
    println!("  {:<22} {mean_trials:.4}", "Mean trials:");
    if let Some(true_p) = true_p {
        println!("  {:<22} {true_p:.4}", "True p:");
    }
    println!(
        "  {:<22} {:.6}  (log-likelihood {:.4})",
        "Analytical MLE:", analytical.p, analytical.log_likelihood
    );
    println!(
        "  {:<22} {:.6}  (log-likelihood {:.4}, {} iterations in [{}, {}])",
        "Numerical MLE:",
        numerical.p,
        numerical.log_likelihood,
        numerical.iterations,
        bounds.lower,
        bounds.upper
    );
    println!("  {:<22} {absolute_difference:.3e}", "Absolute difference:");
}

fn save_curve(dir: &Path, sample: &[u64], comparison: &MleComparison) -> anyhow::Result<()> {
    eprintln!("Computing log-likelihood curve...");
    let curve = LogLikelihoodCurve::evaluate(sample, comparison.successes, &CurveGrid::default())
        .context("Failed to evaluate the log-likelihood curve")?;

    util::create_output_dir(dir)?;
    let csv_path = dir.join(CURVE_CSV_FILE);
    util::write_csv_file(
        &csv_path,
        ["p", "log_likelihood"],
        curve
            .points
            .iter()
            .map(|point| [point.p.to_string(), point.log_likelihood.to_string()]),
    )?;
    eprintln!("Saved: {}", csv_path.display());

    let markers = CurveMarkers {
        true_p: comparison.true_p,
        analytical_p: comparison.analytical.p,
        numerical_p: comparison.numerical.p,
    };
    let markers_path = dir.join(CURVE_MARKERS_FILE);
    util::write_json_file(&markers_path, &markers)?;
    eprintln!("Saved: {}", markers_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_run_writes_curve_and_report() {
        let dir = std::env::temp_dir().join(format!("aptstat-nb-mle-{}", std::process::id()));
        let report_path = dir.join("report.json");
        fs::create_dir_all(&dir).unwrap();

        run(&NbMleArg {
            curve_output: Some(dir.join("curve")),
            output: Some(report_path.clone()),
            ..NbMleArg::default()
        })
        .unwrap();

        let curve = fs::read_to_string(dir.join("curve").join(CURVE_CSV_FILE)).unwrap();
        let lines = curve.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "p,log_likelihood");
        assert_eq!(lines.len(), 1001);
        assert!(lines[1].starts_with("0.01,"));

        let markers: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.join("curve").join(CURVE_MARKERS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(markers["true_p"], 0.4);

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(report["seed"], 123);
        assert_eq!(report["sample"].as_array().unwrap().len(), 50);
        let analytical = report["comparison"]["analytical"]["p"].as_f64().unwrap();
        let numerical = report["comparison"]["numerical"]["p"].as_f64().unwrap();
        assert!((analytical - numerical).abs() < 1e-3);
        assert_eq!(markers["analytical_p"].as_f64().unwrap(), analytical);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_rejects_invalid_bounds() {
        let result = run(&NbMleArg {
            lower: 0.9,
            upper: 0.1,
            ..NbMleArg::default()
        });
        assert!(result.is_err());
    }
}
