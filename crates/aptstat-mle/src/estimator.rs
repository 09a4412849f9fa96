//! Analytical and numerical maximum-likelihood estimates of `p`.

use argmin::{
    core::{Executor, State as _, TerminationReason, TerminationStatus},
    solver::brent::BrentOpt,
};
use serde::Serialize;

use crate::{MleError, likelihood::NegativeBinomialLogLikelihood};

/// Default lower end of the search interval for [`numerical_mle`].
pub const DEFAULT_LOWER_BOUND: f64 = 1e-6;
/// Default upper end of the search interval for [`numerical_mle`].
pub const DEFAULT_UPPER_BOUND: f64 = 1.0 - 1e-6;
/// Default iteration budget for [`numerical_mle`].
pub const DEFAULT_MAX_ITERS: u64 = 500;

/// Open sub-interval of `(0, 1)` searched by the numerical estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_BOUND,
            upper: DEFAULT_UPPER_BOUND,
        }
    }
}

impl SearchBounds {
    /// Creates bounds, checking `0 < lower < upper < 1`.
    ///
    /// # Errors
    ///
    /// Returns [`MleError::InvalidBounds`] if the bounds are not strictly inside `(0, 1)`
    /// or not increasing.
    pub fn new(lower: f64, upper: f64) -> Result<Self, MleError> {
        if !(0.0 < lower && lower < upper && upper < 1.0) {
            return Err(MleError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }
}

/// Configuration of [`numerical_mle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericalMleOptions {
    pub bounds: SearchBounds,
    /// Maximum number of optimizer iterations before giving up.
    pub max_iters: u64,
}

impl Default for NumericalMleOptions {
    fn default() -> Self {
        Self {
            bounds: SearchBounds::default(),
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

/// Result of a converged numerical optimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericalEstimate {
    /// Estimated success probability.
    pub p: f64,
    /// Log-likelihood at `p`.
    pub log_likelihood: f64,
    /// Iterations the optimizer used.
    pub iterations: u64,
}

/// Closed-form maximum-likelihood estimate `k / mean(sample)`.
///
/// Setting the derivative of the log-likelihood to zero gives
/// `n k / p = (sum x - n k) / (1 - p)`, whose solution is `k / mean(sample)`.
/// The result lies in `(0, 1]`; it is exactly `1` only when every observation
/// equals `k` (no failure observed at all).
///
/// # Errors
///
/// Returns the errors of [`validate_sample`](crate::likelihood::validate_sample)
/// for an empty sample, `k == 0`, or an observation smaller than `k`.
///
/// # Examples
///
/// ```
/// use aptstat_mle::estimator::analytical_mle;
///
/// assert_eq!(analytical_mle(&[4, 6, 8], 3)?, 0.5);
/// assert!(analytical_mle(&[2], 3).is_err());
/// # Ok::<(), aptstat_mle::MleError>(())
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn analytical_mle(sample: &[u64], k: u64) -> Result<f64, MleError> {
    let likelihood = NegativeBinomialLogLikelihood::new(sample, k)?;
    Ok(k as f64 / likelihood.mean_trials())
}

/// Numerical maximum-likelihood estimate by bounded scalar optimization.
///
/// Minimizes the negated log-likelihood over `options.bounds` with Brent's
/// derivative-free method. The estimate is only returned if the optimizer
/// reports convergence; running out of iterations is an error.
///
/// # Errors
///
/// - the errors of [`validate_sample`](crate::likelihood::validate_sample)
/// - [`MleError::InvalidBounds`] if the bounds are not `0 < lower < upper < 1`
/// - [`MleError::Optimizer`] if the optimizer itself fails
/// - [`MleError::NotConverged`] if the optimizer stops without converging
///
/// # Examples
///
/// ```
/// use aptstat_mle::estimator::{NumericalMleOptions, numerical_mle};
///
/// let estimate = numerical_mle(&[4, 6, 8], 3, &NumericalMleOptions::default())?;
/// assert!((estimate.p - 0.5).abs() < 1e-3);
/// # Ok::<(), aptstat_mle::MleError>(())
/// ```
pub fn numerical_mle(
    sample: &[u64],
    k: u64,
    options: &NumericalMleOptions,
) -> Result<NumericalEstimate, MleError> {
    let bounds = SearchBounds::new(options.bounds.lower, options.bounds.upper)?;
    let likelihood = NegativeBinomialLogLikelihood::new(sample, k)?;

    let solver = BrentOpt::new(bounds.lower, bounds.upper);
    let result = Executor::new(likelihood, solver)
        .configure(|state| state.max_iters(options.max_iters))
        .run()
        .map_err(|e| MleError::Optimizer {
            message: e.to_string(),
        })?;

    let state = result.state();
    let iterations = state.get_iter();
    match state.get_termination_status() {
        TerminationStatus::Terminated(TerminationReason::SolverConverged) => {}
        status => {
            return Err(MleError::NotConverged {
                iterations,
                status: format!("{status:?}"),
            });
        }
    }
    let p = *state.get_best_param().ok_or_else(|| MleError::Optimizer {
        message: "optimizer returned no parameter".to_owned(),
    })?;

    Ok(NumericalEstimate {
        p,
        log_likelihood: likelihood.eval(p),
        iterations,
    })
}

/// Side-by-side report of both estimates for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MleComparison {
    /// Number of required successes `k`.
    pub successes: u64,
    pub sample_size: usize,
    pub mean_trials: f64,
    /// The probability the sample was generated with, when known.
    pub true_p: Option<f64>,
    pub analytical: AnalyticalEstimate,
    pub numerical: NumericalEstimate,
    pub bounds: SearchBounds,
    /// `|analytical.p - numerical.p|`
    pub absolute_difference: f64,
}

/// Closed-form estimate together with its log-likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalyticalEstimate {
    pub p: f64,
    pub log_likelihood: f64,
}

impl MleComparison {
    /// Computes both estimates from the same sample.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`analytical_mle`] or [`numerical_mle`].
    pub fn compute(
        sample: &[u64],
        k: u64,
        true_p: Option<f64>,
        options: &NumericalMleOptions,
    ) -> Result<Self, MleError> {
        let likelihood = NegativeBinomialLogLikelihood::new(sample, k)?;
        let analytical_p = analytical_mle(sample, k)?;
        let numerical = numerical_mle(sample, k, options)?;
        Ok(Self {
            successes: k,
            sample_size: likelihood.sample_size(),
            mean_trials: likelihood.mean_trials(),
            true_p,
            analytical: AnalyticalEstimate {
                p: analytical_p,
                log_likelihood: likelihood.eval(analytical_p),
            },
            numerical,
            bounds: options.bounds,
            absolute_difference: (analytical_p - numerical.p).abs(),
        })
    }
}
