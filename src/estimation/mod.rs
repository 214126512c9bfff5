//! Control point estimation from pose and speed measurements.
//!
//! # Pipeline
//!
//! The curve's end points `b0` and `b3` are fixed; `b1` and `b2` are unknown.
//!
//! 1. **Parameters** (`parameter.rs`): timestamps are mapped to curve parameters u
//! 2. **Local solve** (`local.rs`): every interior sample gives its own `(b1, b2)`
//!    from its position and its velocity converted to d/du
//! 3. **Aggregation** (`aggregate.rs`): coordinate-wise median over all samples,
//!    with the mean absolute deviation from the median as spread
//!
//! `estimator.rs` drives the three steps. Samples are independent of each other
//! until aggregation.

pub mod aggregate;
pub mod collection;
pub mod error;
pub mod estimator;
pub mod local;
pub mod parameter;

pub use aggregate::{AggregateResult, aggregate, mean_absolute_deviation, median};
pub use collection::{
    ControlPoint, ControlPointEstimate, EstimateCollection, EstimateCollectionBuilder,
};
pub use error::EstimationError;
pub use estimator::ControlPointEstimator;
pub use local::{LocalEstimator, SampleInput, parameter_derivative, solve_control_points};
pub use parameter::normalize;
