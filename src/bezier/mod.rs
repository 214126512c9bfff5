//! Cubic Bézier curve model: the curve the estimator fits against.

pub mod curve;

pub use curve::{CubicBezier, CurveSamples, evaluate, evaluate_sequence};
