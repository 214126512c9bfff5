//! Control point estimation over a whole measurement sequence.
//!
//! 1. Normalize timestamps to curve parameters
//! 2. Solve every interior sample independently (first and last are skipped)
//! 3. Reduce the per-sample estimates with coordinate-wise medians

use anyhow::Context;
use nalgebra::Vector3;
use tracing::info;

use super::aggregate::{AggregateResult, aggregate};
use super::collection::{EstimateCollection, EstimateCollectionBuilder};
use super::error::EstimationError;
use super::local::{DEFAULT_PARAMETER_EPSILON, LocalEstimator, SampleInput};
use super::parameter::normalize;
use crate::geometry::Pose;
use crate::io::measurement::Measurement;

/// Estimates the two interior control points of a cubic Bézier with fixed ends.
#[derive(Debug, Clone, Copy)]
pub struct ControlPointEstimator {
    /// Parameters within this distance of 0 or 1 abort the run.
    pub parameter_epsilon: f64,
}

impl Default for ControlPointEstimator {
    fn default() -> Self {
        Self {
            parameter_epsilon: DEFAULT_PARAMETER_EPSILON,
        }
    }
}

impl ControlPointEstimator {
    pub fn new(parameter_epsilon: f64) -> Self {
        Self { parameter_epsilon }
    }

    /// Optimized `b1`, `b2` for the curve from `b0` to `b3` through the samples.
    ///
    /// `poses`, `speeds` and `timestamps` are index-aligned and must contain at
    /// least three samples.
    pub fn estimate(
        &self,
        b0: Vector3<f64>,
        b3: Vector3<f64>,
        poses: &[Pose],
        speeds: &[f64],
        timestamps: &[f64],
    ) -> Result<AggregateResult, EstimationError> {
        let estimates = self.collect_estimates(b0, b3, poses, speeds, timestamps)?;
        let result = aggregate(&estimates)?;

        info!(
            "Estimated control points from {} interior samples: \
             b1=[{:.3}, {:.3}, {:.3}], b2=[{:.3}, {:.3}, {:.3}]",
            estimates.len(),
            result.b1.x,
            result.b1.y,
            result.b1.z,
            result.b2.x,
            result.b2.y,
            result.b2.z,
        );

        Ok(result)
    }

    /// Per-sample estimates for every interior sample, in sample order.
    ///
    /// The result has exactly `n - 2` entries for `n` samples.
    pub fn collect_estimates(
        &self,
        b0: Vector3<f64>,
        b3: Vector3<f64>,
        poses: &[Pose],
        speeds: &[f64],
        timestamps: &[f64],
    ) -> Result<EstimateCollection, EstimationError> {
        let n = poses.len();
        if speeds.len() != n || timestamps.len() != n {
            return Err(EstimationError::InconsistentLength {
                poses: n,
                speeds: speeds.len(),
                timestamps: timestamps.len(),
            });
        }
        if n < 3 {
            return Err(EstimationError::InsufficientSamples {
                interior: n.saturating_sub(2),
            });
        }

        let parameters = normalize(timestamps);
        let local = LocalEstimator::new(b0, b3).with_parameter_epsilon(self.parameter_epsilon);
        let start_timestamp = timestamps[0];

        let mut builder = EstimateCollectionBuilder::with_capacity(n - 2);
        for i in 1..n - 1 {
            let sample = SampleInput {
                u: parameters[i],
                position: poses[i].position(),
                tangent: poses[i].forward(),
                speed: speeds[i],
                timestamp: timestamps[i],
                start_timestamp,
            };
            builder.push(local.estimate(i, &sample)?);
        }

        Ok(builder.finish())
    }

    /// Estimate from a loaded measurement, anchored at its first and last positions.
    ///
    /// Fails if the measurement carries no timestamps or speeds.
    pub fn estimate_measurement(
        &self,
        measurement: &Measurement,
    ) -> anyhow::Result<AggregateResult> {
        let timestamps = measurement.timestamps()?;
        let speeds = measurement.speeds()?;
        let (b0, b3) = measurement
            .anchors()
            .with_context(|| format!("Measurement {} has no samples", measurement.name))?;

        let result = self
            .estimate(b0, b3, &measurement.poses(), &speeds, &timestamps)
            .with_context(|| format!("Control point estimation failed for {}", measurement.name))?;
        Ok(result)
    }
}
