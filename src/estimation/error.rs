use thiserror::Error;

/// Errors raised while estimating interior control points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// An interior sample's curve parameter is at (or numerically at) 0 or 1,
    /// which makes its 2x2 system singular.
    #[error(
        "sample {index}: curve parameter u = {u} is degenerate \
         (must lie strictly inside (0, 1)); check the timestamps"
    )]
    DegenerateParameter { index: usize, u: f64 },

    /// An interior sample's position, direction, speed or timestamp is NaN or
    /// infinite.
    #[error("sample {index}: measured position, direction, speed or timestamp is not finite")]
    NonFiniteMeasurement { index: usize },

    /// No interior sample to estimate from (fewer than three samples in total).
    #[error(
        "at least one interior sample is required (3 samples in total), \
         got {interior} interior samples"
    )]
    InsufficientSamples { interior: usize },

    /// Pose, speed and timestamp sequences differ in length.
    #[error(
        "inconsistent input lengths: {poses} poses, {speeds} speeds, {timestamps} timestamps"
    )]
    InconsistentLength {
        poses: usize,
        speeds: usize,
        timestamps: usize,
    },
}
