pub mod bezier;
pub mod config;
pub mod estimation;
pub mod geometry;
pub mod io;
#[cfg(feature = "viz")]
pub mod viz;
