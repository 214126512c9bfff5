//! Measurement file I/O.

pub mod filename;
pub mod measurement;

pub use filename::MeasurementConfig;
pub use measurement::{Measurement, Sample, list_measurements};
