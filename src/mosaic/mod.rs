//! Grid geometry, canvas painting and the phase-ordered pipeline

/// Output canvas and clipping blit
pub mod canvas;
/// Cell-parallel compositing of matched tiles
pub mod compositor;
/// Grid geometry and cell enumeration
pub mod grid;
/// Catalog, compositing and persistence phases in order
pub mod pipeline;

pub use grid::{Cell, Grid};
