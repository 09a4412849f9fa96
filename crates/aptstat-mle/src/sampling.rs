//! Synthetic negative binomial samples.
//!
//! One draw is the total number of Bernoulli trials until the `k`-th success.
//! It is generated as `k` plus the sum of `k` independent geometric variables,
//! each counting the failures before one success. That is the "failures before
//! the `k`-th success, plus `k`" convention the estimators assume.

use rand::{Rng, SeedableRng as _, distr::Distribution};
use rand_distr::Geometric;
use rand_pcg::Pcg32;

use crate::MleError;

/// Distribution of the number of trials needed to observe `k` successes.
///
/// # Example
///
/// ```
/// use aptstat_mle::sampling::NegativeBinomialTrials;
///
/// let trials = NegativeBinomialTrials::new(3, 0.4)?;
///
/// // Same seed, same sample
/// let a = trials.sample_seeded(50, 123);
/// let b = trials.sample_seeded(50, 123);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|&x| x >= 3));
/// # Ok::<(), aptstat_mle::MleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NegativeBinomialTrials {
    successes: u64,
    failures_per_success: Geometric,
}

impl NegativeBinomialTrials {
    /// Creates the distribution for `k` successes with success probability `p`.
    ///
    /// # Errors
    ///
    /// - [`MleError::ZeroSuccesses`] if `k` is zero
    /// - [`MleError::InvalidProbability`] if `p` is outside `(0, 1)`
    pub fn new(k: u64, p: f64) -> Result<Self, MleError> {
        if k == 0 {
            return Err(MleError::ZeroSuccesses);
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(MleError::InvalidProbability { p });
        }
        let failures_per_success =
            Geometric::new(p).map_err(|_| MleError::InvalidProbability { p })?;
        Ok(Self {
            successes: k,
            failures_per_success,
        })
    }

    /// Draws `n` observations from `rng`.
    pub fn sample_n<R>(&self, n: usize, rng: &mut R) -> Vec<u64>
    where
        R: Rng + ?Sized,
    {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    /// Draws `n` observations from a generator seeded with `seed`.
    ///
    /// The result depends only on `(k, p, n, seed)`.
    #[must_use]
    pub fn sample_seeded(&self, n: usize, seed: u64) -> Vec<u64> {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.sample_n(n, &mut rng)
    }
}

impl Distribution<u64> for NegativeBinomialTrials {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let failures = (0..self.successes)
            .map(|_| self.failures_per_success.sample(rng))
            .fold(0_u64, u64::saturating_add);
        self.successes.saturating_add(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            NegativeBinomialTrials::new(0, 0.4).unwrap_err(),
            MleError::ZeroSuccesses
        );
        for p in [0.0, 1.0, -0.1, 1.1] {
            assert!(matches!(
                NegativeBinomialTrials::new(3, p),
                Err(MleError::InvalidProbability { .. })
            ));
        }
        assert!(NegativeBinomialTrials::new(3, f64::NAN).is_err());
    }

    #[test]
    fn test_every_value_at_least_k() {
        let trials = NegativeBinomialTrials::new(5, 0.9).unwrap();
        let sample = trials.sample_seeded(1000, 7);
        assert_eq!(sample.len(), 1000);
        assert!(sample.iter().all(|&x| x >= 5));
        // With p = 0.9 most draws need no failures at all
        assert!(sample.iter().any(|&x| x == 5));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let trials = NegativeBinomialTrials::new(3, 0.4).unwrap();
        assert_eq!(trials.sample_seeded(50, 123), trials.sample_seeded(50, 123));
        assert_ne!(trials.sample_seeded(50, 123), trials.sample_seeded(50, 124));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_mean_matches_k_over_p() {
        let trials = NegativeBinomialTrials::new(3, 0.4).unwrap();
        let sample = trials.sample_seeded(20_000, 42);
        let mean = sample.iter().sum::<u64>() as f64 / sample.len() as f64;
        // E[X] = k / p = 7.5, sd of the mean ~ 0.024
        assert!((mean - 7.5).abs() < 0.15, "mean = {mean}");
    }
}
