//! Tile and catalog data model

use crate::color::average::{AverageColor, average_image_color};
use crate::color::matching::nearest_tile;
use crate::io::error::Result;
use crate::io::image::{Rgb16Image, resize_to_width};
use image::DynamicImage;
use std::collections::BTreeMap;

/// A candidate image resized to the cell width, with its precomputed average colour
#[derive(Clone, Debug)]
pub struct Tile {
    id: String,
    average_color: AverageColor,
    bitmap: Rgb16Image,
    origin: (u32, u32),
}

impl Tile {
    /// Assemble a tile from already-computed parts
    pub const fn new(
        id: String,
        average_color: AverageColor,
        bitmap: Rgb16Image,
        origin: (u32, u32),
    ) -> Self {
        Self {
            id,
            average_color,
            bitmap,
            origin,
        }
    }

    /// Resize a decoded image to `cell_width` and average the result
    ///
    /// # Errors
    ///
    /// Returns an error if the resized bitmap is empty
    pub fn from_image(
        id: impl Into<String>,
        decoded: &DynamicImage,
        cell_width: u32,
    ) -> Result<Self> {
        let bitmap = resize_to_width(decoded, cell_width);
        Self::from_bitmap(id, bitmap)
    }

    /// Tile built from a bitmap that is already at cell size
    ///
    /// # Errors
    ///
    /// Returns an error if the bitmap is empty
    pub fn from_bitmap(id: impl Into<String>, bitmap: Rgb16Image) -> Result<Self> {
        let average_color = average_image_color(&bitmap)?;
        Ok(Self::new(id.into(), average_color, bitmap, (0, 0)))
    }

    /// Source filename
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Mean colour of the resized bitmap
    pub const fn average_color(&self) -> AverageColor {
        self.average_color
    }

    /// Bitmap resized to the cell width
    pub const fn bitmap(&self) -> &Rgb16Image {
        &self.bitmap
    }

    /// Read origin used when blitting the bitmap
    pub const fn origin(&self) -> (u32, u32) {
        self.origin
    }
}

/// Complete set of usable tiles keyed by filename
///
/// Iteration is in ascending id order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tiles: BTreeMap<String, Tile>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect tiles into a catalog; a later tile replaces an earlier one with the same id
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut catalog = Self::new();
        for tile in tiles {
            catalog.insert(tile);
        }
        catalog
    }

    /// Insert a tile keyed by its id, returning any tile it replaced
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.id.clone(), tile)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by filename
    pub fn get(&self, id: &str) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Whether a tile with this filename exists
    pub fn contains(&self, id: &str) -> bool {
        self.tiles.contains_key(id)
    }

    /// Tiles in ascending id order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tile ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tiles.keys().map(String::as_str)
    }

    /// Tile whose average colour is closest to `query`
    pub fn nearest(&self, query: AverageColor) -> Option<&Tile> {
        nearest_tile(query, self)
    }
}
