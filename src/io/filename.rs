//! Test configuration encoded in measurement file names.
//!
//! Generated measurements are named like
//! `parable3D_WNOTRS_3D_P_10_NoiseT_0.1_NoiseR_5_NoiseS_1_001.txt`: the curve
//! name comes first, then `<key>_<value>` pairs for the number of points and
//! the noise standard deviations added to translation, rotation and speed.

use anyhow::{Context, Result};

/// Measurement setup recovered from a file name.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementConfig {
    pub curve_name: String,
    /// Number of measurement points (`P_`).
    pub points: f64,
    /// Translation noise σ in m (`NoiseT_`).
    pub noise_translation: f64,
    /// Rotation noise σ in degrees (`NoiseR_`).
    pub noise_rotation: f64,
    /// Speed noise σ in m/s (`NoiseS_`).
    pub noise_speed: f64,
    /// Scale factor of scaled measurements (`abSkal_`).
    pub scale: Option<f64>,
}

impl MeasurementConfig {
    pub fn from_filename(filename: &str) -> Result<Self> {
        let stem = filename.strip_suffix(".txt").unwrap_or(filename);
        let tokens: Vec<&str> = stem.split('_').collect();

        let curve_name = tokens[0].to_string();
        let points = value_after(&tokens, "P")?
            .with_context(|| format!("No point count (P_<n>) in {}", filename))?;

        Ok(Self {
            curve_name,
            points,
            noise_translation: value_after(&tokens, "NoiseT")?.unwrap_or(0.0),
            noise_rotation: value_after(&tokens, "NoiseR")?.unwrap_or(0.0),
            noise_speed: value_after(&tokens, "NoiseS")?.unwrap_or(0.0),
            scale: value_after(&tokens, "abSkal")?,
        })
    }

    /// Plot title, listing only the noise terms that are present.
    pub fn title(&self, estimated: bool) -> String {
        let mut title = format!("Bézier curve {}", self.curve_name);
        if estimated {
            title.push_str(" with estimated control points");
        }
        title.push_str(&format!(" at N={}", self.points));
        if self.noise_translation != 0.0 {
            title.push_str(&format!(", σ_T = {} m", self.noise_translation));
        }
        if self.noise_rotation != 0.0 {
            title.push_str(&format!(", σ_R = {} °", self.noise_rotation));
        }
        if self.noise_speed != 0.0 {
            title.push_str(&format!(", σ_S = {} m/s", self.noise_speed));
        }
        title
    }
}

/// Value of the token following `key`, if `key` occurs (after the curve name).
fn value_after(tokens: &[&str], key: &str) -> Result<Option<f64>> {
    let Some(pos) = tokens.iter().skip(1).position(|t| *t == key) else {
        return Ok(None);
    };
    let raw = tokens
        .get(pos + 2)
        .with_context(|| format!("Missing value after {}_", key))?;
    let value = raw
        .parse()
        .with_context(|| format!("Invalid value {:?} for {}_", raw, key))?;
    Ok(Some(value))
}
