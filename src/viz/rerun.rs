//! Rerun-based visualization of measurements and fitted curves.
//!
//! Entity hierarchy:
//!     title                        - Curve name, point count and noise levels
//!     world/
//!         translations             - Measured positions (green)
//!         cameras/{x,y,z}          - Camera axes at every sample (red/green/blue)
//!         ground_truth/
//!             control_polygon      - b0-b1-b2-b3 (black)
//!             bezier_points        - b0, b3 (blue)
//!             control_points       - b1, b2 (red)
//!             curve                - Ground-truth curve (magenta)
//!         optimized/
//!             control_points       - Estimated b1, b2 (dark red)
//!             curve                - Curve through the estimate (dark red)

use anyhow::Result;
use nalgebra::Vector3;
use rerun::RecordingStream;

use crate::bezier::CubicBezier;
use crate::config::{FitConfig, PlotOptions};
use crate::estimation::AggregateResult;
use crate::io::measurement::Measurement;

const GREEN: [u8; 3] = [0, 160, 0];
const BLACK: [u8; 3] = [0, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];
const MAGENTA: [u8; 3] = [255, 0, 255];
const DARK_RED: [u8; 3] = [139, 0, 0];
const AXIS_COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 200, 0], [0, 0, 255]];

pub struct CurveVisualizer {
    rec: RecordingStream,
    plot: PlotOptions,
    curve_samples: usize,
    axis_scale: f64,
}

impl CurveVisualizer {
    pub fn new(app_name: &str, config: &FitConfig) -> Result<Self> {
        // Runs rerun viewer in a separate process
        let rec = rerun::RecordingStreamBuilder::new(app_name).spawn()?;
        rec.log_static("world", &rerun::ViewCoordinates::RFU()).ok();

        Ok(Self {
            rec,
            plot: config.plot,
            curve_samples: config.curve_samples,
            axis_scale: config.axis_scale,
        })
    }

    /// Select the measurement all following logs belong to.
    pub fn set_measurement(&self, index: usize) {
        self.rec.set_time_sequence("measurement", index as i64);
    }

    pub fn log_title(&self, title: &str) {
        self.rec
            .log("title", &rerun::TextDocument::new(title.to_string()))
            .ok();
    }

    /// Log measured samples and the ground-truth curve they came from.
    pub fn log_measurement(&self, measurement: &Measurement) {
        let ground_truth = measurement.ground_truth();
        let [b0, b1, b2, b3] = ground_truth.control_points;

        if self.plot.translations {
            self.log_points("world/translations", &measurement.positions(), GREEN, 0.03);
        }
        if self.plot.control_polygon {
            self.log_line(
                "world/ground_truth/control_polygon",
                ground_truth.control_polygon(),
                BLACK,
                0.01,
            );
        }
        if self.plot.bezier_points {
            self.log_points("world/ground_truth/bezier_points", &[b0, b3], BLUE, 0.06);
        }
        if self.plot.control_points {
            self.log_points("world/ground_truth/control_points", &[b1, b2], RED, 0.06);
        }
        if self.plot.ground_truth {
            self.log_curve("world/ground_truth/curve", &ground_truth, MAGENTA);
        }
        if self.plot.camera_frames {
            self.log_camera_frames(measurement);
        }
    }

    /// Log the optimized control points and the curve they define.
    pub fn log_estimate(&self, b0: Vector3<f64>, b3: Vector3<f64>, result: &AggregateResult) {
        if self.plot.optimized_points {
            self.log_points(
                "world/optimized/control_points",
                &result.control_points(),
                DARK_RED,
                0.08,
            );
        }
        if self.plot.optimized_curve {
            self.log_curve("world/optimized/curve", &result.curve(b0, b3), DARK_RED);
        }
    }

    fn log_camera_frames(&self, measurement: &Measurement) {
        let segments: Vec<_> = measurement
            .samples
            .iter()
            .map(|s| s.pose.axis_segments(self.axis_scale))
            .collect();

        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            let strips: Vec<Vec<[f32; 3]>> = segments
                .iter()
                .map(|seg| seg[axis].iter().map(to_f32).collect())
                .collect();
            self.rec
                .log(
                    format!("world/cameras/{}", name).as_str(),
                    &rerun::LineStrips3D::new(strips)
                        .with_colors([AXIS_COLORS[axis]])
                        .with_radii([0.005f32]),
                )
                .ok();
        }
    }

    fn log_curve(&self, path: &str, curve: &CubicBezier, color: [u8; 3]) {
        let pts: Vec<Vector3<f64>> = curve.sample(self.curve_samples).collect();
        self.log_line(path, &pts, color, 0.01);
    }

    fn log_line(&self, path: &str, points: &[Vector3<f64>], color: [u8; 3], radius: f32) {
        if points.len() < 2 {
            return;
        }
        let pts: Vec<[f32; 3]> = points.iter().map(to_f32).collect();
        self.rec
            .log(
                path,
                &rerun::LineStrips3D::new([pts])
                    .with_colors([color])
                    .with_radii([radius]),
            )
            .ok();
    }

    fn log_points(&self, path: &str, points: &[Vector3<f64>], color: [u8; 3], radius: f32) {
        if points.is_empty() {
            return;
        }
        let pts: Vec<[f32; 3]> = points.iter().map(to_f32).collect();
        self.rec
            .log(
                path,
                &rerun::Points3D::new(pts)
                    .with_colors([color])
                    .with_radii([radius]),
            )
            .ok();
    }
}

fn to_f32(p: &Vector3<f64>) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}
