//! Run configuration, loaded from YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::estimation::local::DEFAULT_PARAMETER_EPSILON;

/// Settings for estimation and rendering.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Points per rendered curve.
    pub curve_samples: usize,
    /// Length of the rendered camera axes.
    pub axis_scale: f64,
    /// Curve parameters this close to 0 or 1 are rejected as degenerate.
    pub parameter_epsilon: f64,
    pub plot: PlotOptions,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            curve_samples: 500,
            axis_scale: 0.2,
            parameter_epsilon: DEFAULT_PARAMETER_EPSILON,
            plot: PlotOptions::default(),
        }
    }
}

impl FitConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

/// What to draw for each measurement.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Measured positions.
    pub translations: bool,
    /// Ground-truth control polygon b0-b1-b2-b3.
    pub control_polygon: bool,
    /// Ground-truth b1 and b2.
    pub control_points: bool,
    /// Ground-truth end points b0 and b3.
    pub bezier_points: bool,
    pub ground_truth: bool,
    pub camera_frames: bool,
    pub optimized_points: bool,
    pub optimized_curve: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            translations: true,
            control_polygon: true,
            control_points: true,
            bezier_points: true,
            ground_truth: true,
            camera_frames: true,
            optimized_points: true,
            optimized_curve: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.curve_samples, 500);
        assert_eq!(config.axis_scale, 0.2);
        assert!(config.plot.camera_frames);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "curve_samples: 100\nplot:\n  camera_frames: false\n";
        let config = FitConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.curve_samples, 100);
        assert_eq!(config.axis_scale, 0.2);
        assert_eq!(config.parameter_epsilon, DEFAULT_PARAMETER_EPSILON);
        assert!(!config.plot.camera_frames);
        assert!(config.plot.optimized_curve);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(FitConfig::from_yaml("curve_samples: many").is_err());
    }
}
