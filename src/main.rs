use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bezier_fit::config::FitConfig;
use bezier_fit::estimation::{AggregateResult, ControlPointEstimator};
use bezier_fit::io::{Measurement, MeasurementConfig, list_measurements};
#[cfg(feature = "viz")]
use bezier_fit::viz::CurveVisualizer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bezier_fit=info")),
        )
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "measurementData/".to_string());
    let config = match std::env::args().nth(2) {
        Some(path) => FitConfig::load(path)?,
        None => FitConfig::default(),
    };

    let files = measurement_files(Path::new(&input))?;
    info!("Processing {} measurement file(s) from {}", files.len(), input);

    let estimator = ControlPointEstimator::new(config.parameter_epsilon);

    #[cfg(feature = "viz")]
    let viz = CurveVisualizer::new("bezier-fit", &config)?;

    for (i, path) in files.iter().enumerate() {
        let measurement = match Measurement::load(path) {
            Ok(measurement) => measurement,
            Err(e) => {
                error!("{:#}", e);
                continue;
            }
        };
        println!(
            "Loaded {} ({} samples)",
            measurement.name,
            measurement.len()
        );

        let result = match estimator.estimate_measurement(&measurement) {
            Ok(result) => Some(result),
            Err(e) => {
                error!("{:#}", e);
                None
            }
        };
        if let Some(result) = &result {
            print_result(&measurement, result);
        }

        let title = match MeasurementConfig::from_filename(&measurement.name) {
            Ok(c) => c.title(result.is_some()),
            Err(e) => {
                warn!("No test configuration in file name: {:#}", e);
                measurement.name.clone()
            }
        };

        #[cfg(feature = "viz")]
        {
            viz.set_measurement(i);
            viz.log_title(&format!("{}\nmeasurement file: {}", title, measurement.name));
            viz.log_measurement(&measurement);
            if let (Some(result), Some((b0, b3))) = (&result, measurement.anchors()) {
                viz.log_estimate(b0, b3, result);
            }
        }
        #[cfg(not(feature = "viz"))]
        info!("{} (measurement {})", title, i);
    }

    println!("Done! Processed {} measurement(s)", files.len());
    Ok(())
}

/// A single measurement file, or every measurement file in a directory.
fn measurement_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let files = list_measurements(input)?;
        if files.is_empty() {
            bail!("No .txt measurement files in {}", input.display());
        }
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

fn print_result(measurement: &Measurement, result: &AggregateResult) {
    let truth = measurement.control_points;
    for (name, (estimate, mad), expected) in [
        ("b1", (result.b1, result.mad_b1), truth[1]),
        ("b2", (result.b2, result.mad_b2), truth[2]),
    ] {
        println!(
            "  {}: [{:.4}, {:.4}, {:.4}]  MAD [{:.4}, {:.4}, {:.4}]  error vs ground truth {:.4}",
            name,
            estimate.x,
            estimate.y,
            estimate.z,
            mad.x,
            mad.y,
            mad.z,
            (estimate - expected).norm()
        );
    }
}
