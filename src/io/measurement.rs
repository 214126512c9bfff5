//! Measurement file loading.
//!
//! A measurement file holds one sample per line followed by the four
//! ground-truth control points of the curve the samples were taken from:
//!
//! ```text
//! t, u, v, ((r00, r01, r02, tx), (r10, r11, r12, ty), (r20, r21, r22, tz), (0, 0, 0, 1))
//! ...
//! (b0x, b0y, b0z)
//! (b1x, b1y, b1z)
//! (b2x, b2y, b2z)
//! (b3x, b3y, b3z)
//! ```
//!
//! The leading scalars are optional: a sample line carries either none (line
//! starts with the pose), `t`, `t, u`, or `t, u, v` (timestamp, ground-truth
//! curve parameter, speed). The layout of the first line applies to the whole
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use nalgebra::{Matrix4, Vector3};

use crate::bezier::CubicBezier;
use crate::geometry::Pose;

/// Number of trailing lines holding control points.
const CONTROL_POINT_LINES: usize = 4;

/// One measured sample.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Position in the file's sample sequence.
    pub index: usize,
    pub timestamp: Option<f64>,
    /// Ground-truth curve parameter, when the generator recorded it.
    pub parameter: Option<f64>,
    /// Speed magnitude.
    pub speed: Option<f64>,
    pub pose: Pose,
}

/// A loaded measurement: samples plus the ground-truth curve.
#[derive(Debug, Clone)]
pub struct Measurement {
    /// File name the measurement was loaded from.
    pub name: String,
    pub samples: Vec<Sample>,
    /// Ground-truth control points `[b0, b1, b2, b3]`.
    pub control_points: [Vector3<f64>; 4],
}

impl Measurement {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::parse(name, &text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();

        if lines.len() < CONTROL_POINT_LINES {
            bail!(
                "Expected at least {} control point lines, got {} non-empty lines",
                CONTROL_POINT_LINES,
                lines.len()
            );
        }
        let (sample_lines, cp_lines) = lines.split_at(lines.len() - CONTROL_POINT_LINES);

        let mut samples = Vec::with_capacity(sample_lines.len());
        let mut columns = None;
        for (index, &(line_no, line)) in sample_lines.iter().enumerate() {
            let (scalars, pose) = parse_sample_line(line)
                .with_context(|| format!("Invalid sample at line {}", line_no))?;

            let expected = *columns.get_or_insert(scalars.len());
            if scalars.len() != expected {
                bail!(
                    "Line {} has {} leading values, but the first sample has {}",
                    line_no,
                    scalars.len(),
                    expected
                );
            }

            samples.push(Sample {
                index,
                timestamp: scalars.first().copied(),
                parameter: scalars.get(1).copied(),
                speed: scalars.get(2).copied(),
                pose,
            });
        }

        let mut control_points = [Vector3::zeros(); 4];
        for (cp, &(line_no, line)) in control_points.iter_mut().zip(cp_lines) {
            *cp = parse_point(line)
                .with_context(|| format!("Invalid control point at line {}", line_no))?;
        }

        Ok(Self {
            name: name.into(),
            samples,
            control_points,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn poses(&self) -> Vec<Pose> {
        self.samples.iter().map(|s| s.pose).collect()
    }

    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.samples.iter().map(|s| s.pose.position()).collect()
    }

    pub fn timestamps(&self) -> Result<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| s.timestamp)
            .collect::<Option<Vec<_>>>()
            .with_context(|| format!("Measurement {} has no timestamps", self.name))
    }

    pub fn speeds(&self) -> Result<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| s.speed)
            .collect::<Option<Vec<_>>>()
            .with_context(|| format!("Measurement {} has no speed values", self.name))
    }

    /// First and last measured positions, used as the fixed curve ends.
    pub fn anchors(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.pose.position(), last.pose.position()))
    }

    pub fn ground_truth(&self) -> CubicBezier {
        CubicBezier::new(self.control_points)
    }
}

/// All `.txt` measurement files in `dir`, sorted by name.
pub fn list_measurements<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Split a sample line into its leading scalars and pose.
fn parse_sample_line(line: &str) -> Result<(Vec<f64>, Pose)> {
    let Some(open) = line.find('(') else {
        bail!("No pose found");
    };
    let (prefix, pose_str) = line.split_at(open);

    let prefix = prefix.trim().trim_end_matches(',');
    let scalars = if prefix.trim().is_empty() {
        Vec::new()
    } else {
        parse_numbers(prefix)?
    };
    if scalars.len() > 3 {
        bail!("Expected at most 3 leading values (t, u, v), got {}", scalars.len());
    }

    let rows = innermost_groups(pose_str);
    if rows.len() != 4 {
        bail!("Expected 4 pose rows, got {}", rows.len());
    }
    let mut data = Vec::with_capacity(16);
    for row in rows {
        let values = parse_numbers(row)?;
        if values.len() != 4 {
            bail!("Expected 4 values per pose row, got {}", values.len());
        }
        data.extend(values);
    }

    Ok((scalars, Pose::from_matrix(Matrix4::from_row_slice(&data))))
}

fn parse_point(line: &str) -> Result<Vector3<f64>> {
    let groups = innermost_groups(line);
    let [group] = groups.as_slice() else {
        bail!("Expected one parenthesized point, got {}", groups.len());
    };
    let values = parse_numbers(group)?;
    if values.len() != 3 {
        bail!("Expected 3 coordinates, got {}", values.len());
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

/// Contents of every `( ... )` group that contains no nested parentheses.
fn innermost_groups(s: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut open = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => open = Some(i + 1),
            ')' => {
                if let Some(start) = open.take() {
                    groups.push(&s[start..i]);
                }
            }
            _ => {}
        }
    }
    groups
}

fn parse_numbers(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            v.parse::<f64>()
                .with_context(|| format!("Invalid number {:?}", v))
        })
        .collect()
}
