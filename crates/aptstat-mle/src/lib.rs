//! Maximum-likelihood estimation for the negative binomial distribution.
//!
//! The model counts the total number of Bernoulli trials needed to observe a
//! fixed number `k` of successes, each trial succeeding with an unknown
//! probability `p`. Given a sample of such trial counts this crate estimates `p`
//! two independent ways and lets callers compare them:
//!
//! - **Analytical** ([`estimator::analytical_mle`]): the closed-form maximizer
//!   `k / mean(sample)`.
//! - **Numerical** ([`estimator::numerical_mle`]): maximizes
//!   [`likelihood::log_likelihood`] with a derivative-free bounded scalar
//!   optimizer (Brent's method).
//!
//! Both target the same unique maximizer of a concave objective, so they agree
//! up to the optimizer tolerance.
//!
//! # Modules
//!
//! - [`likelihood`]: log-likelihood function and sample validation
//! - [`estimator`]: analytical and numerical estimates, and their comparison
//! - [`sampling`]: seeded generation of synthetic samples
//! - [`curve`]: log-likelihood evaluated over a grid of `p` for plotting
//!
//! # Examples
//!
//! ```
//! use aptstat_mle::{
//!     estimator::{self, NumericalMleOptions},
//!     sampling::NegativeBinomialTrials,
//! };
//!
//! let k = 3;
//! let sample = NegativeBinomialTrials::new(k, 0.4)?.sample_seeded(50, 123);
//!
//! let analytical = estimator::analytical_mle(&sample, k)?;
//! let numerical = estimator::numerical_mle(&sample, k, &NumericalMleOptions::default())?;
//! assert!((analytical - numerical.p).abs() < 1e-3);
//! # Ok::<(), aptstat_mle::MleError>(())
//! ```

pub mod curve;
pub mod estimator;
pub mod likelihood;
pub mod sampling;

/// Errors reported by the estimators, the sampler and the curve evaluator.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum MleError {
    #[display("sample is empty")]
    EmptySample,
    #[display("number of successes must be at least 1")]
    ZeroSuccesses,
    #[display(
        "observation #{index} is {value} trials, fewer than the {successes} required successes"
    )]
    ObservationBelowSuccesses {
        index: usize,
        value: u64,
        successes: u64,
    },
    #[display("success probability {p} is outside the open interval (0, 1)")]
    InvalidProbability { p: f64 },
    #[display("search bounds ({lower}, {upper}) must satisfy 0 < lower < upper < 1")]
    InvalidBounds { lower: f64, upper: f64 },
    #[display(
        "grid ({start}, {end}) with {points} points needs 0 < start < end < 1 and points >= 2"
    )]
    InvalidGrid { start: f64, end: f64, points: usize },
    #[display("optimizer failed: {message}")]
    Optimizer { message: String },
    #[display("optimizer did not converge after {iterations} iterations ({status})")]
    NotConverged { iterations: u64, status: String },
}
