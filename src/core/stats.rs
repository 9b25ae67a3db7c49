//! Small statistical helpers shared by the sampler, the checks, and the
//! report aggregator.
//!
//! All standard deviations in this crate are population standard deviations
//! (divide by N, not N-1).

/// Arithmetic mean. Returns 0.0 for an empty slice; callers guard emptiness
/// where absence matters.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. 0.0 for empty or singleton slices.
pub fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Minimum of a slice, ignoring NaN. None for an empty slice.
pub fn min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
}

/// Maximum of a slice, ignoring NaN. None for an empty slice.
pub fn max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std(&data) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_of_singleton_is_zero() {
        assert_eq!(population_std(&[3.7]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, 1.0, 2.0];
        assert_eq!(min(&data), Some(1.0));
        assert_eq!(max(&data), Some(3.0));
        assert_eq!(min(&[]), None);
    }
}
