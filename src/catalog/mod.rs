//! Tile catalog construction and storage

/// Concurrent catalog building from candidate files
pub mod builder;
/// Tile and catalog types
pub mod tile;

pub use tile::{Catalog, Tile};
