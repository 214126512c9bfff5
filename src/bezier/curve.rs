//! Cubic Bézier curve in 3-D.
//!
//! ```text
//! B(u)  = (1-u)³ b0 + 3u(1-u)² b1 + 3u²(1-u) b2 + u³ b3
//! B'(u) = 3(1-u)² (b1-b0) + 6u(1-u) (b2-b1) + 3u² (b3-b2)
//! ```
//!
//! `u` is nominally in [0, 1] but values outside are evaluated with the same
//! polynomial (extrapolation).

use nalgebra::Vector3;

/// Cubic Bézier segment defined by four control points `[b0, b1, b2, b3]`.
///
/// `b0` and `b3` lie on the curve; `b1` and `b2` shape it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub control_points: [Vector3<f64>; 4],
}

impl CubicBezier {
    pub fn new(control_points: [Vector3<f64>; 4]) -> Self {
        Self { control_points }
    }

    /// Curve through anchors `b0`, `b3` shaped by interior points `b1`, `b2`.
    pub fn from_points(
        b0: Vector3<f64>,
        b1: Vector3<f64>,
        b2: Vector3<f64>,
        b3: Vector3<f64>,
    ) -> Self {
        Self {
            control_points: [b0, b1, b2, b3],
        }
    }

    #[inline]
    pub fn start(&self) -> Vector3<f64> {
        self.control_points[0]
    }

    #[inline]
    pub fn end(&self) -> Vector3<f64> {
        self.control_points[3]
    }

    /// Point on the curve at parameter `u`.
    #[inline]
    pub fn evaluate(&self, u: f64) -> Vector3<f64> {
        evaluate(u, &self.control_points)
    }

    /// Derivative of the curve with respect to `u`.
    pub fn derivative(&self, u: f64) -> Vector3<f64> {
        let [b0, b1, b2, b3] = self.control_points;
        let v = 1.0 - u;
        3.0 * v * v * (b1 - b0) + 6.0 * u * v * (b2 - b1) + 3.0 * u * u * (b3 - b2)
    }

    /// `n` points at parameters evenly spaced over [0, 1], both ends included.
    pub fn sample(&self, n: usize) -> CurveSamples {
        evaluate_sequence(&self.control_points, n)
    }

    /// Control polygon b0 → b1 → b2 → b3.
    pub fn control_polygon(&self) -> &[Vector3<f64>] {
        &self.control_points
    }
}

/// Evaluate the cubic Bernstein form at `u`.
#[inline]
pub fn evaluate(u: f64, b: &[Vector3<f64>; 4]) -> Vector3<f64> {
    let v = 1.0 - u;
    b[0] * (v * v * v) + b[1] * (3.0 * u * v * v) + b[2] * (3.0 * u * u * v) + b[3] * (u * u * u)
}

/// Evaluate `n` points evenly spaced in parameter over [0, 1].
///
/// Matches `linspace(0, 1, n)`: for `n >= 2` the first and last points are
/// exactly `b0` and `b3`; `n == 1` yields only `u = 0`.
pub fn evaluate_sequence(b: &[Vector3<f64>; 4], n: usize) -> CurveSamples {
    CurveSamples {
        control_points: *b,
        count: n,
        next: 0,
    }
}

/// Iterator over evenly spaced curve points.
///
/// Holds no state beyond its position, so cloning a fresh one restarts the
/// sequence.
#[derive(Debug, Clone)]
pub struct CurveSamples {
    control_points: [Vector3<f64>; 4],
    count: usize,
    next: usize,
}

impl CurveSamples {
    fn parameter(&self, i: usize) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        // Pin the last parameter so the curve ends exactly at b3.
        if i == self.count - 1 {
            1.0
        } else {
            i as f64 / (self.count - 1) as f64
        }
    }
}

impl Iterator for CurveSamples {
    type Item = Vector3<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let u = self.parameter(self.next);
        self.next += 1;
        Some(evaluate(u, &self.control_points))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveSamples {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_curve() -> CubicBezier {
        CubicBezier::from_points(
            Vector3::new(-1.5, 0.25, 2.0),
            Vector3::new(2.0, 3.0, -1.0),
            Vector3::new(7.0, -3.0, 4.5),
            Vector3::new(10.0, 0.5, -0.75),
        )
    }

    #[test]
    fn test_endpoints_interpolated() {
        let curve = test_curve();
        assert_relative_eq!(curve.evaluate(0.0), curve.start(), epsilon = 1e-12);
        assert_relative_eq!(curve.evaluate(1.0), curve.end(), epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint() {
        let curve = test_curve();
        let [b0, b1, b2, b3] = curve.control_points;
        let expected = (b0 + 3.0 * b1 + 3.0 * b2 + b3) / 8.0;
        assert_relative_eq!(curve.evaluate(0.5), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_not_rejected() {
        let curve = test_curve();
        let p = curve.evaluate(1.5);
        assert!(p.iter().all(|c| c.is_finite()));
        assert_relative_eq!(p, evaluate(1.5, &curve.control_points), epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let curve = test_curve();
        let h = 1e-6;
        for &u in &[0.1, 0.35, 0.8] {
            let numeric = (curve.evaluate(u + h) - curve.evaluate(u - h)) / (2.0 * h);
            assert_relative_eq!(curve.derivative(u), numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_derivative_at_endpoints_follows_control_polygon() {
        let curve = test_curve();
        let [b0, b1, b2, b3] = curve.control_points;
        assert_relative_eq!(curve.derivative(0.0), 3.0 * (b1 - b0), epsilon = 1e-12);
        assert_relative_eq!(curve.derivative(1.0), 3.0 * (b3 - b2), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_includes_both_endpoints() {
        let curve = test_curve();
        let points: Vec<_> = curve.sample(500).collect();

        assert_eq!(points.len(), 500);
        assert_relative_eq!(points[0], curve.start(), epsilon = 1e-12);
        assert_relative_eq!(points[499], curve.end(), epsilon = 1e-12);
        assert_relative_eq!(points[1], curve.evaluate(1.0 / 499.0), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_is_restartable() {
        let samples = test_curve().sample(7);
        let first: Vec<_> = samples.clone().collect();
        let second: Vec<_> = samples.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_degenerate_counts() {
        let curve = test_curve();
        assert_eq!(curve.sample(0).len(), 0);

        let single: Vec<_> = curve.sample(1).collect();
        assert_eq!(single, vec![curve.start()]);
    }
}
