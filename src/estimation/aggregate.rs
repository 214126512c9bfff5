//! Robust combination of per-sample estimates.
//!
//! Samples with u close to 0 or 1 solve a near-singular system and produce
//! heavy-tailed estimates, so each coordinate is combined with its median
//! instead of its mean. The spread reported alongside is the mean absolute
//! deviation from that median (not the median of the deviations).

use nalgebra::Vector3;

use super::collection::{ControlPoint, EstimateCollection};
use super::error::EstimationError;
use crate::bezier::CubicBezier;

/// Optimized interior control points and their per-axis deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub b1: Vector3<f64>,
    pub b2: Vector3<f64>,
    /// Per-axis mean absolute deviation of the `b1` estimates from `b1`.
    pub mad_b1: Vector3<f64>,
    /// Per-axis mean absolute deviation of the `b2` estimates from `b2`.
    pub mad_b2: Vector3<f64>,
}

impl AggregateResult {
    pub fn control_points(&self) -> [Vector3<f64>; 2] {
        [self.b1, self.b2]
    }

    pub fn deviations(&self) -> [Vector3<f64>; 2] {
        [self.mad_b1, self.mad_b2]
    }

    /// Full curve using the optimized interior points between the given anchors.
    pub fn curve(&self, b0: Vector3<f64>, b3: Vector3<f64>) -> CubicBezier {
        CubicBezier::from_points(b0, self.b1, self.b2, b3)
    }
}

/// Median of `values`; even counts average the two middle values.
///
/// Returns NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Mean of `|x - center|` over `values`.
pub fn mean_absolute_deviation(center: f64, values: &[f64]) -> f64 {
    let sum: f64 = values.iter().map(|x| (x - center).abs()).sum();
    sum / values.len() as f64
}

/// Median and deviation of one control point, axis by axis.
fn aggregate_point(
    collection: &EstimateCollection,
    which: ControlPoint,
) -> (Vector3<f64>, Vector3<f64>) {
    let mut center = Vector3::zeros();
    let mut spread = Vector3::zeros();
    for axis in 0..3 {
        let values = collection.axis_values(which, axis);
        let m = median(&values);
        center[axis] = m;
        spread[axis] = mean_absolute_deviation(m, &values);
    }
    (center, spread)
}

/// Reduce all per-sample estimates to one pair of control points.
///
/// All six (control point, axis) series are handled independently.
pub fn aggregate(collection: &EstimateCollection) -> Result<AggregateResult, EstimationError> {
    if collection.is_empty() {
        return Err(EstimationError::InsufficientSamples { interior: 0 });
    }

    let (b1, mad_b1) = aggregate_point(collection, ControlPoint::B1);
    let (b2, mad_b2) = aggregate_point(collection, ControlPoint::B2);

    Ok(AggregateResult {
        b1,
        b2,
        mad_b1,
        mad_b2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::collection::{ControlPointEstimate, EstimateCollectionBuilder};
    use approx::assert_relative_eq;

    fn estimate(index: usize, b1: Vector3<f64>, b2: Vector3<f64>) -> ControlPointEstimate {
        ControlPointEstimate {
            sample_index: index,
            u: 0.5,
            b1,
            b2,
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_mean_absolute_deviation_uses_mean() {
        // Deviations from 2: 1, 0, 0, 10 -> mean 2.75 (a median-based MAD would give 0.5)
        let values = [1.0, 2.0, 2.0, 12.0];
        assert_relative_eq!(mean_absolute_deviation(2.0, &values), 2.75, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_estimates_have_zero_deviation() {
        let b1 = Vector3::new(2.0, 3.0, 0.0);
        let b2 = Vector3::new(7.0, -3.0, 0.0);
        let collection: EstimateCollection =
            (1..=5).map(|i| estimate(i, b1, b2)).collect();

        let result = aggregate(&collection).unwrap();
        assert_eq!(result.b1, b1);
        assert_eq!(result.b2, b2);
        assert_eq!(result.mad_b1, Vector3::zeros());
        assert_eq!(result.mad_b2, Vector3::zeros());
    }

    #[test]
    fn test_median_outvotes_single_outlier() {
        let b1 = Vector3::new(2.0, 3.0, 0.0);
        let b2 = Vector3::new(7.0, -3.0, 0.0);
        let clean: EstimateCollection = (1..=3).map(|i| estimate(i, b1, b2)).collect();
        let clean_result = aggregate(&clean).unwrap();

        let outlier = estimate(
            99,
            Vector3::new(250.0, -80.0, 40.0),
            Vector3::new(-300.0, 120.0, -60.0),
        );

        for position in 0..=3 {
            let mut builder = EstimateCollectionBuilder::new();
            for (i, e) in clean.iter().enumerate() {
                if i == position {
                    builder.push(outlier);
                }
                builder.push(*e);
            }
            if position == 3 {
                builder.push(outlier);
            }
            let noisy = builder.finish();
            assert_eq!(noisy.len(), 4);

            let result = aggregate(&noisy).unwrap();
            assert_relative_eq!(result.b1, b1, epsilon = 1e-12);
            assert_relative_eq!(result.b2, b2, epsilon = 1e-12);
            for axis in 0..3 {
                assert!(result.mad_b1[axis] > clean_result.mad_b1[axis]);
                assert!(result.mad_b2[axis] > clean_result.mad_b2[axis]);
            }
        }
    }

    #[test]
    fn test_axes_and_points_are_independent() {
        let collection: EstimateCollection = [
            estimate(1, Vector3::new(1.0, 10.0, 100.0), Vector3::new(-1.0, -10.0, -100.0)),
            estimate(2, Vector3::new(2.0, 30.0, 100.0), Vector3::new(-2.0, -30.0, -100.0)),
            estimate(3, Vector3::new(6.0, 20.0, 100.0), Vector3::new(-6.0, -20.0, -100.0)),
        ]
        .into_iter()
        .collect();

        let result = aggregate(&collection).unwrap();
        assert_eq!(result.b1, Vector3::new(2.0, 20.0, 100.0));
        assert_eq!(result.b2, Vector3::new(-2.0, -20.0, -100.0));
        // x: |1-2| + 0 + |6-2| = 5 -> 5/3; y: 10 + 10 + 0 = 20 -> 20/3
        let expected_mad = Vector3::new(5.0 / 3.0, 20.0 / 3.0, 0.0);
        assert_relative_eq!(result.mad_b1, expected_mad, epsilon = 1e-12);
        assert_relative_eq!(result.mad_b2, expected_mad, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_collection_is_an_error() {
        let empty = EstimateCollectionBuilder::new().finish();
        assert_eq!(
            aggregate(&empty),
            Err(EstimationError::InsufficientSamples { interior: 0 })
        );
    }
}
