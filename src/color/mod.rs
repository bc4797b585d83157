//! Colour statistics and nearest-colour matching

/// Mean RGB colour of pixel regions
pub mod average;
/// Euclidean nearest-colour lookup
pub mod matching;

pub use average::{AverageColor, Region};
