//! Single-sample control point estimation.
//!
//! Each interior sample yields two constraints on the curve at its parameter u:
//! the measured position B(u) and the measured velocity converted to a
//! parameter-space derivative B'(u). With b0 and b3 fixed, both are linear in
//! the unknowns b1 and b2:
//!
//! ```text
//! | 3u(1-u)²              3u²(1-u)         | |b1|   | p  - (1-u)³ b0 - u³ b3   |
//! | 3((1-u)² - 2u(1-u))   3(2u(1-u) - u²)  | |b2| = | B' + 3(1-u)² b0 - 3u² b3 |
//! ```
//!
//! The determinant is 9u²(1-u)², so the system is singular only at u = 0 or 1.
//! The same 2x2 matrix serves all three axes; the right-hand side is stacked
//! as a 2x3 matrix with one column per axis.

use nalgebra::{Matrix2, Matrix2x3, Vector3};
use tracing::debug;

use super::collection::ControlPointEstimate;
use super::error::EstimationError;

/// Default distance from 0 and 1 below which a parameter counts as degenerate.
pub const DEFAULT_PARAMETER_EPSILON: f64 = 1e-9;

/// Everything one interior sample contributes to its estimate.
#[derive(Debug, Clone, Copy)]
pub struct SampleInput {
    /// Curve parameter of the sample.
    pub u: f64,
    /// Measured position.
    pub position: Vector3<f64>,
    /// Unit direction of travel (camera viewing direction).
    pub tangent: Vector3<f64>,
    /// Measured speed magnitude in real time units.
    pub speed: f64,
    pub timestamp: f64,
    /// Timestamp of the first sample in the sequence.
    pub start_timestamp: f64,
}

impl SampleInput {
    /// Whether every measured quantity is a finite number.
    pub fn is_finite(&self) -> bool {
        self.speed.is_finite()
            && self.timestamp.is_finite()
            && self.start_timestamp.is_finite()
            && self.position.iter().all(|x| x.is_finite())
            && self.tangent.iter().all(|x| x.is_finite())
    }
}

/// Convert a real-time velocity into a derivative with respect to u.
///
/// The local ratio dt/du is taken as `(t - t_start) / u`, i.e. assumed constant
/// between the start of the curve and this sample.
#[inline]
pub fn parameter_derivative(
    tangent: &Vector3<f64>,
    speed: f64,
    timestamp: f64,
    start_timestamp: f64,
    u: f64,
) -> Vector3<f64> {
    tangent * (speed * ((timestamp - start_timestamp) / u))
}

/// Solve the 2x2 position/derivative system at `u` for `(b1, b2)`.
///
/// `derivative` is B'(u), already with respect to the curve parameter.
/// Returns `None` when the system is singular.
pub fn solve_control_points(
    u: f64,
    b0: &Vector3<f64>,
    b3: &Vector3<f64>,
    position: &Vector3<f64>,
    derivative: &Vector3<f64>,
) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let v = 1.0 - u;

    let lhs = Matrix2::new(
        3.0 * u * v * v,
        3.0 * u * u * v,
        3.0 * (v * v - 2.0 * u * v),
        3.0 * (2.0 * u * v - u * u),
    );

    let position_rhs = position - b0 * (v * v * v) - b3 * (u * u * u);
    let derivative_rhs = derivative + b0 * (3.0 * v * v) - b3 * (3.0 * u * u);
    let rhs = Matrix2x3::from_rows(&[position_rhs.transpose(), derivative_rhs.transpose()]);

    let solution = lhs.lu().solve(&rhs)?;
    if solution.iter().any(|x| !x.is_finite()) {
        return None;
    }

    Some((
        solution.row(0).transpose(),
        solution.row(1).transpose(),
    ))
}

/// Estimates `b1`, `b2` from a single sample against fixed anchors.
#[derive(Debug, Clone, Copy)]
pub struct LocalEstimator {
    pub b0: Vector3<f64>,
    pub b3: Vector3<f64>,
    /// Parameters within this distance of 0 or 1 are rejected.
    pub parameter_epsilon: f64,
}

impl LocalEstimator {
    pub fn new(b0: Vector3<f64>, b3: Vector3<f64>) -> Self {
        Self {
            b0,
            b3,
            parameter_epsilon: DEFAULT_PARAMETER_EPSILON,
        }
    }

    pub fn with_parameter_epsilon(mut self, epsilon: f64) -> Self {
        self.parameter_epsilon = epsilon;
        self
    }

    /// Whether `u` is far enough from 0 and 1 for a well-posed solve.
    pub fn is_admissible(&self, u: f64) -> bool {
        u.is_finite()
            && u.abs() > self.parameter_epsilon
            && (1.0 - u).abs() > self.parameter_epsilon
    }

    /// Estimate from the sample at `index` in the measurement sequence.
    pub fn estimate(
        &self,
        index: usize,
        sample: &SampleInput,
    ) -> Result<ControlPointEstimate, EstimationError> {
        let u = sample.u;
        if !self.is_admissible(u) {
            return Err(EstimationError::DegenerateParameter { index, u });
        }
        if !sample.is_finite() {
            return Err(EstimationError::NonFiniteMeasurement { index });
        }

        let derivative = parameter_derivative(
            &sample.tangent,
            sample.speed,
            sample.timestamp,
            sample.start_timestamp,
            u,
        );

        let (b1, b2) = solve_control_points(u, &self.b0, &self.b3, &sample.position, &derivative)
            .ok_or(EstimationError::DegenerateParameter { index, u })?;

        debug!(
            "sample {}: u={:.4}, b1=[{:.3}, {:.3}, {:.3}], b2=[{:.3}, {:.3}, {:.3}]",
            index, u, b1.x, b1.y, b1.z, b2.x, b2.y, b2.z
        );

        Ok(ControlPointEstimate {
            sample_index: index,
            u,
            b1,
            b2,
        })
    }
}
