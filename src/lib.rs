//! Photomosaic construction from a directory of tile images
//!
//! A source image is split into a grid of cells. Each cell is replaced by the
//! tile whose average colour is nearest to the cell's own average colour. Tiles
//! are indexed in parallel into an immutable catalog first, then cells are
//! matched and painted in parallel onto a canvas the size of the source.

#![forbid(unsafe_code)]

/// Tile catalog construction and storage
pub mod catalog;
/// Average colour computation and nearest-colour matching
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Grid geometry, compositing and the pipeline
pub mod mosaic;

pub use io::error::{MosaicError, Result};
