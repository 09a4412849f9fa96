//! Negative binomial log-likelihood.
//!
//! For a sample `x_1..x_n` of trial counts and `k` required successes,
//!
//! ```text
//! l(p) = sum_i [ ln C(x_i - 1, k - 1) + k ln p + (x_i - k) ln(1 - p) ]
//! ```
//!
//! The binomial term does not depend on `p`, and the remaining terms only depend
//! on the sample through `n` and `sum_i x_i`. [`NegativeBinomialLogLikelihood`]
//! precomputes those so that repeated evaluation (by the optimizer) is `O(1)`.

use argmin::core::{CostFunction, Error};
use statrs::function::factorial;

use crate::MleError;

/// Checks that `sample` can have been produced by the model with `k` successes.
///
/// # Errors
///
/// - [`MleError::ZeroSuccesses`] if `k` is zero
/// - [`MleError::EmptySample`] if `sample` is empty
/// - [`MleError::ObservationBelowSuccesses`] for the first value smaller than `k`
pub fn validate_sample(sample: &[u64], k: u64) -> Result<(), MleError> {
    if k == 0 {
        return Err(MleError::ZeroSuccesses);
    }
    if sample.is_empty() {
        return Err(MleError::EmptySample);
    }
    if let Some((index, &value)) = sample.iter().enumerate().find(|&(_, &x)| x < k) {
        return Err(MleError::ObservationBelowSuccesses {
            index,
            value,
            successes: k,
        });
    }
    Ok(())
}

/// Total log-likelihood of `sample` under the negative binomial model `(k, p)`.
///
/// Returns negative infinity when `p` is outside the open interval `(0, 1)`
/// (NaN included), so a bounded optimizer can evaluate the boundary safely. An
/// observation smaller than `k`, or `k == 0`, has probability zero and also
/// yields negative infinity.
///
/// # Examples
///
/// ```
/// use aptstat_mle::likelihood::log_likelihood;
///
/// let sample = [4, 6, 8];
/// let at_mle = log_likelihood(0.5, &sample, 3);
/// assert!(at_mle > log_likelihood(0.4, &sample, 3));
/// assert!(at_mle > log_likelihood(0.6, &sample, 3));
/// assert_eq!(log_likelihood(1.0, &sample, 3), f64::NEG_INFINITY);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn log_likelihood(p: f64, sample: &[u64], k: u64) -> f64 {
    if !(p > 0.0 && p < 1.0) || k == 0 {
        return f64::NEG_INFINITY;
    }
    let ln_p = p.ln();
    let ln_q = (-p).ln_1p();
    sample
        .iter()
        .map(|&x| {
            if x < k {
                return f64::NEG_INFINITY;
            }
            factorial::ln_binomial(x - 1, k - 1) + k as f64 * ln_p + (x - k) as f64 * ln_q
        })
        .sum()
}

/// Log-likelihood of one validated sample, reduced to its sufficient statistics.
///
/// Evaluates to the same value as [`log_likelihood`] for the sample it was built
/// from. Implements [`CostFunction`] as the *negated* log-likelihood, which is
/// what the numerical estimator minimizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeBinomialLogLikelihood {
    successes: u64,
    sample_size: usize,
    total_trials: u64,
    /// `sum_i ln C(x_i - 1, k - 1)`
    ln_binomial_sum: f64,
}

impl NegativeBinomialLogLikelihood {
    /// Builds the log-likelihood for `sample` with `k` required successes.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`validate_sample`].
    pub fn new(sample: &[u64], k: u64) -> Result<Self, MleError> {
        validate_sample(sample, k)?;
        let ln_binomial_sum = sample
            .iter()
            .map(|&x| factorial::ln_binomial(x - 1, k - 1))
            .sum();
        Ok(Self {
            successes: k,
            sample_size: sample.len(),
            total_trials: sample.iter().sum(),
            ln_binomial_sum,
        })
    }

    /// Number of required successes `k`.
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of observations `n`.
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Sample mean of the trial counts.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_trials(&self) -> f64 {
        self.total_trials as f64 / self.sample_size as f64
    }

    /// Evaluates the log-likelihood at `p`.
    ///
    /// Follows the same boundary convention as [`log_likelihood`].
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn eval(&self, p: f64) -> f64 {
        if !(p > 0.0 && p < 1.0) {
            return f64::NEG_INFINITY;
        }
        let total_successes = self.successes as f64 * self.sample_size as f64;
        let total_failures = self.total_trials as f64 - total_successes;
        self.ln_binomial_sum + total_successes * p.ln() + total_failures * (-p).ln_1p()
    }
}

impl CostFunction for NegativeBinomialLogLikelihood {
    type Param = f64;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, Error> {
        Ok(-self.eval(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u64; 3] = [4, 6, 8];

    /// `l(p - h) - 2 l(p) + l(p + h)` at each interior point of an equally spaced grid
    fn second_differences(likelihood: &NegativeBinomialLogLikelihood, grid: &[f64]) -> Vec<f64> {
        let values = grid.iter().map(|&p| likelihood.eval(p)).collect::<Vec<_>>();
        values
            .windows(3)
            .map(|l| l[0] - 2.0 * l[1] + l[2])
            .collect()
    }

    #[test]
    fn test_outside_unit_interval_is_negative_infinity() {
        for p in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert_eq!(log_likelihood(p, &SAMPLE, 3), f64::NEG_INFINITY, "p = {p}");
        }
    }

    #[test]
    fn test_tends_to_negative_infinity_at_boundaries() {
        let ll = |p| log_likelihood(p, &SAMPLE, 3);
        assert!(ll(1e-12) < ll(1e-6));
        assert!(ll(1e-6) < ll(1e-3));
        assert!(ll(1.0 - 1e-12) < ll(1.0 - 1e-6));
        assert!(ll(1.0 - 1e-6) < ll(0.999));
        assert!(ll(1e-300) < -1000.0);
    }

    #[test]
    fn test_matches_hand_computation() {
        // C(3,2) = 3, C(5,2) = 10, C(7,2) = 21; 9 successes and 9 failures in total
        let p: f64 = 0.3;
        let expected = 630.0_f64.ln() + 9.0 * p.ln() + 9.0 * (1.0 - p).ln();
        assert!((log_likelihood(p, &SAMPLE, 3) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_impossible_observation_has_zero_likelihood() {
        assert_eq!(log_likelihood(0.5, &[2], 3), f64::NEG_INFINITY);
        assert_eq!(log_likelihood(0.5, &[0], 1), f64::NEG_INFINITY);
        assert_eq!(log_likelihood(0.5, &[5], 0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_sufficient_statistics_match_direct_sum() {
        let sample = [3, 3, 5, 9, 14, 4, 7];
        let likelihood = NegativeBinomialLogLikelihood::new(&sample, 3).unwrap();
        for p in [0.01, 0.2, 0.43, 0.5, 0.77, 0.99] {
            let direct = log_likelihood(p, &sample, 3);
            assert!((likelihood.eval(p) - direct).abs() < 1e-9, "p = {p}");
        }
        assert_eq!(likelihood.eval(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_cost_is_negated_log_likelihood() {
        let likelihood = NegativeBinomialLogLikelihood::new(&SAMPLE, 3).unwrap();
        let cost = likelihood.cost(&0.3).unwrap();
        assert!((cost + likelihood.eval(0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_strictly_concave() {
        let likelihood = NegativeBinomialLogLikelihood::new(&[3, 4, 9, 12, 5], 3).unwrap();
        let grid = (1..1000).map(|i| f64::from(i) / 1000.0).collect::<Vec<_>>();
        let diffs = second_differences(&likelihood, &grid);
        assert_eq!(diffs.len(), grid.len() - 2);
        assert!(diffs.iter().all(|&d| d < 0.0));
    }

    #[test]
    fn test_validate_sample() {
        assert_eq!(validate_sample(&[], 3), Err(MleError::EmptySample));
        assert_eq!(validate_sample(&[4], 0), Err(MleError::ZeroSuccesses));
        assert_eq!(
            validate_sample(&[3, 5, 2, 1], 3),
            Err(MleError::ObservationBelowSuccesses {
                index: 2,
                value: 2,
                successes: 3
            })
        );
        assert_eq!(validate_sample(&[3, 5], 3), Ok(()));
    }
}
