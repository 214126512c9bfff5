//! Mapping from sample timestamps to curve parameters.

/// Curve parameter for every sample: `t_i / (t_last - t_first)`.
///
/// The numerator is the raw timestamp, not the elapsed time, so the result only
/// spans [0, 1] for timestamps starting at zero. Callers with shifted clocks
/// must rebase them first. The first and last parameters are never consumed by
/// the estimator.
pub fn normalize(timestamps: &[f64]) -> Vec<f64> {
    let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) else {
        return Vec::new();
    };
    let span = last - first;
    timestamps.iter().map(|t| t / span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_based_timestamps() {
        let u = normalize(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(u, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_interior_strictly_inside_unit_interval() {
        let u = normalize(&[0.0, 0.13, 0.9, 2.2, 3.1]);
        for &ui in &u[1..u.len() - 1] {
            assert!(ui > 0.0 && ui < 1.0);
        }
    }

    #[test]
    fn test_shifted_timestamps_divide_raw_value() {
        // Offset clocks are not rebased.
        let u = normalize(&[10.0, 11.0, 12.0]);
        assert_relative_eq!(u[1], 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_empty() {
        assert!(normalize(&[]).is_empty());
    }
}
