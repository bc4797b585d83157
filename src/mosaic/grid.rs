//! Grid geometry derived from image dimensions and tile count

use crate::color::average::Region;
use crate::io::error::{MosaicError, Result};

/// One output cell, addressed by column and row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Zero-based column index
    pub column: u32,
    /// Zero-based row index
    pub row: u32,
    /// Pixel region, already clipped to the canvas
    pub region: Region,
}

/// Partition of a `width × height` image into cells of `cell_width × cell_height`
///
/// Cells step by whole cell sizes from the origin. When the image size is not
/// a multiple of the cell size, the trailing row and column hold narrower
/// cells clipped to the image bounds. Cells never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tile_count: u32,
    cell_width: u32,
    cell_height: u32,
}

impl Grid {
    /// Derive a grid with `tile_count` cells along each edge
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidGrid`] if `width / tile_count` or
    /// `height / tile_count` is zero (including a zero tile count)
    pub fn new(width: u32, height: u32, tile_count: u32) -> Result<Self> {
        let invalid = MosaicError::InvalidGrid {
            width,
            height,
            tile_count,
        };
        let cell_width = width.checked_div(tile_count).unwrap_or(0);
        let cell_height = height.checked_div(tile_count).unwrap_or(0);

        if cell_width == 0 || cell_height == 0 {
            return Err(invalid);
        }

        Ok(Self {
            width,
            height,
            tile_count,
            cell_width,
            cell_height,
        })
    }

    /// Image width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Requested tiles per edge
    pub const fn tile_count(&self) -> u32 {
        self.tile_count
    }

    /// Nominal cell width
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Nominal cell height
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of cell columns, counting a clipped trailing column
    pub const fn columns(&self) -> u32 {
        self.width.div_ceil(self.cell_width)
    }

    /// Number of cell rows, counting a clipped trailing row
    pub const fn rows(&self) -> u32 {
        self.height.div_ceil(self.cell_height)
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Cell at the given column and row, or `None` outside the grid
    pub fn cell(&self, column: u32, row: u32) -> Option<Cell> {
        let x = column.checked_mul(self.cell_width)?;
        let y = row.checked_mul(self.cell_height)?;
        let region = Region::new(x, y, self.cell_width, self.cell_height)
            .clip(self.width, self.height)?;
        Some(Cell {
            column,
            row,
            region,
        })
    }

    /// Cells of one row, left to right
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = Cell> + '_ {
        (0..self.columns()).filter_map(move |column| self.cell(column, row))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.rows()).flat_map(|row| self.row_cells(row)).collect()
    }
}
