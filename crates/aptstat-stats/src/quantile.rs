/// Computes a single quantile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: the quantile `q`
/// sits at fractional position `(n - 1) * q`, and the result interpolates
/// between the values on either side of that position. This matches the
/// default method of pandas and numpy.
///
/// `q` is clamped to `[0.0, 1.0]`.
///
/// # Returns
///
/// The value at the specified quantile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use aptstat_stats::quantile::quantile_sorted;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(quantile_sorted(&values, 0.5), 2.5);
/// assert_eq!(quantile_sorted(&values, 0.25), 1.75);
/// assert_eq!(quantile_sorted(&values, 1.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = position - position.floor();
    let low_value = sorted_values[lower];
    low_value + (sorted_values[upper] - low_value) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn test_single_value() {
        assert_eq!(quantile_sorted(&[7.0], 0.0), 7.0);
        assert_eq!(quantile_sorted(&[7.0], 0.75), 7.0);
        assert_eq!(quantile_sorted(&[7.0], 1.0), 7.0);
    }

    #[test]
    fn test_interpolation_matches_pandas() {
        // pandas.Series([10, 20, 30, 40, 50]).quantile([0.1, 0.25, 0.75]) -> 14, 20, 40
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!((quantile_sorted(&values, 0.1) - 14.0).abs() < 1e-12);
        assert!((quantile_sorted(&values, 0.25) - 20.0).abs() < 1e-12);
        assert!((quantile_sorted(&values, 0.75) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(quantile_sorted(&values, -0.5), 1.0);
        assert_eq!(quantile_sorted(&values, 1.5), 3.0);
    }
}
