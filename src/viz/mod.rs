//! Visualization of measurements, ground truth and estimated curves.

pub mod rerun;

pub use self::rerun::CurveVisualizer;
