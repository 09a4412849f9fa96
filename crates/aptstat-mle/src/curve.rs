//! Log-likelihood evaluated over a grid of `p`, for plotting.

use serde::Serialize;

use crate::{MleError, likelihood::NegativeBinomialLogLikelihood};

/// Evenly spaced grid of success probabilities, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveGrid {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Default for CurveGrid {
    fn default() -> Self {
        Self {
            start: 0.01,
            end: 0.99,
            points: 1000,
        }
    }
}

impl CurveGrid {
    /// Checks that the grid lies strictly inside `(0, 1)`, is increasing and has
    /// at least two points.
    ///
    /// # Errors
    ///
    /// Returns [`MleError::InvalidGrid`] otherwise.
    pub fn validate(&self) -> Result<(), MleError> {
        let Self { start, end, points } = *self;
        if !(0.0 < start && start < end && end < 1.0) || points < 2 {
            return Err(MleError::InvalidGrid { start, end, points });
        }
        Ok(())
    }

    /// Iterates over the grid points in increasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use aptstat_mle::curve::CurveGrid;
    ///
    /// let grid = CurveGrid { start: 0.2, end: 0.8, points: 4 };
    /// let ps = grid.iter().collect::<Vec<_>>();
    /// assert_eq!(ps.len(), 4);
    /// assert_eq!(ps[0], 0.2);
    /// assert_eq!(ps[3], 0.8);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let step = (self.end - self.start) / self.points.saturating_sub(1).max(1) as f64;
        (0..self.points).map(move |i| {
            if i + 1 == self.points {
                self.end
            } else {
                self.start + i as f64 * step
            }
        })
    }
}

/// One point of a log-likelihood curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub p: f64,
    pub log_likelihood: f64,
}

/// Log-likelihood of a sample over a grid of `p`, strictly increasing in `p`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLikelihoodCurve {
    pub points: Vec<CurvePoint>,
}

impl LogLikelihoodCurve {
    /// Evaluates the log-likelihood of `sample` with `k` successes at every grid point.
    ///
    /// # Errors
    ///
    /// - [`MleError::InvalidGrid`] for an invalid grid
    /// - the sample errors of [`NegativeBinomialLogLikelihood::new`]
    pub fn evaluate(sample: &[u64], k: u64, grid: &CurveGrid) -> Result<Self, MleError> {
        grid.validate()?;
        let likelihood = NegativeBinomialLogLikelihood::new(sample, k)?;
        let points = grid
            .iter()
            .map(|p| CurvePoint {
                p,
                log_likelihood: likelihood.eval(p),
            })
            .collect();
        Ok(Self { points })
    }
}
