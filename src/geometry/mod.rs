//! Geometry utilities: camera poses.

pub mod pose;

pub use pose::Pose;
