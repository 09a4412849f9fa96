//! Pearson and Spearman rank correlation.

use std::iter;

/// Ranks values in ascending order, assigning ties the average of their ranks.
///
/// Ranks start at `1.0`. The result has the same length and order as the input.
///
/// # Examples
///
/// ```
/// use aptstat_stats::correlation::rank_average;
///
/// assert_eq!(rank_average(&[10.0, 30.0, 20.0, 20.0]), vec![1.0, 4.0, 2.5, 2.5]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].total_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        // Positions start..end (0-based) share ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Computes the Pearson product-moment correlation coefficient.
///
/// Returns `None` if the slices differ in length, contain fewer than two values,
/// or either slice has zero variance.
///
/// # Examples
///
/// ```
/// use aptstat_stats::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in iter::zip(x, y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Computes the Spearman rank correlation coefficient.
///
/// Both inputs are ranked with [`rank_average`] and the Pearson coefficient of
/// the ranks is returned. The `None` cases are the same as for [`pearson`].
///
/// # Examples
///
/// ```
/// use aptstat_stats::correlation::spearman;
///
/// // Any monotone transform has perfect rank correlation
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = x.map(|v: f64| v.exp());
/// assert!((spearman(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&rank_average(x), &rank_average(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_without_ties() {
        assert_eq!(rank_average(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_rank_all_tied() {
        assert_eq!(rank_average(&[7.0; 4]), vec![2.5; 4]);
    }

    #[test]
    fn test_spearman_reversed() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [40.0, 30.0, 20.0, 10.0];
        assert!((spearman(&x, &y).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_with_ties() {
        // ranks x: 1, 2.5, 2.5, 4; ranks y: 1, 2, 3, 4
        let x = [1.0, 2.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let r = spearman(&x, &y).unwrap();
        let expected = 4.5 / (4.5_f64 * 5.0).sqrt();
        assert!((r - expected).abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(spearman(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(spearman(&[1.0], &[1.0]), None);
        assert_eq!(spearman(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
    }
}
