//! Cell-parallel mosaic compositing
//!
//! Each cell is sampled, matched and blitted by its own task. The source image
//! and catalog are only read, so tasks share them freely; the canvas is the one
//! shared mutable structure and is either guarded by a single lock or split
//! into disjoint bands owned by one task each.

use crate::catalog::tile::{Catalog, Tile};
use crate::color::average::{AverageColor, average_color};
use crate::color::matching::{euclidean_distance, nearest_tile};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::Rgb16Image;
use crate::io::progress::PhaseProgress;
use crate::mosaic::canvas::{Canvas, CanvasBand};
use crate::mosaic::grid::{Cell, Grid};
use clap::ValueEnum;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fmt;

/// How concurrent cell tasks write into the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CanvasStrategy {
    /// One task per cell; every blit takes the same exclusive canvas lock
    #[default]
    Locked,
    /// One task per row of cells, each owning its band of the canvas outright
    Partitioned,
    /// Cells are painted one after another on the calling thread
    Sequential,
}

impl fmt::Display for CanvasStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Locked => "locked",
            Self::Partitioned => "partitioned",
            Self::Sequential => "sequential",
        };
        f.write_str(name)
    }
}

/// Which tile was chosen for a cell, and why
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// The painted cell
    pub cell: Cell,
    /// Average colour sampled from the source under the cell
    pub query: AverageColor,
    /// Id of the nearest tile
    pub tile_id: String,
    /// Distance between `query` and the tile's average colour
    pub distance: f64,
}

/// A fully painted canvas with the placement of every cell in row-major order
#[derive(Debug)]
pub struct Composition {
    /// The finished canvas
    pub canvas: Canvas,
    /// One placement per grid cell
    pub placements: Vec<Placement>,
}

// Catalogs handed straight to the compositor have no directory to report
const fn detached_empty_catalog() -> MosaicError {
    MosaicError::EmptyCatalog {
        source_dir: None,
        candidates: 0,
    }
}

/// Paints a source image's grid cells with their nearest catalog tiles
pub struct MosaicCompositor<'a> {
    source: &'a Rgb16Image,
    catalog: &'a Catalog,
    grid: Grid,
    strategy: CanvasStrategy,
    progress: PhaseProgress,
}

impl<'a> MosaicCompositor<'a> {
    /// Prepare to composite `source` over `grid` using tiles from `catalog`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog is empty
    /// - The grid dimensions differ from the source image dimensions
    pub fn new(source: &'a Rgb16Image, catalog: &'a Catalog, grid: Grid) -> Result<Self> {
        if catalog.is_empty() {
            return Err(detached_empty_catalog());
        }

        if source.dimensions() != (grid.width(), grid.height()) {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", grid.width(), grid.height()),
                &format!(
                    "does not match {}x{} source image",
                    source.width(),
                    source.height()
                ),
            ));
        }

        Ok(Self {
            source,
            catalog,
            grid,
            strategy: CanvasStrategy::default(),
            progress: PhaseProgress::hidden(),
        })
    }

    /// Select how the canvas is shared between tasks
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CanvasStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Report each painted cell to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: PhaseProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Grid being painted
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Paint every cell and return once all cell tasks have joined
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be sampled or matched; neither can
    /// happen for a grid built from the source dimensions and a non-empty catalog
    pub fn compose(&self) -> Result<Composition> {
        self.progress.set_length(self.grid.cell_count() as u64);

        let composition = match self.strategy {
            CanvasStrategy::Locked => self.compose_locked(),
            CanvasStrategy::Partitioned => self.compose_partitioned(),
            CanvasStrategy::Sequential => self.compose_sequential(),
        }?;

        tracing::debug!(
            cells = composition.placements.len(),
            strategy = %self.strategy,
            "compositing joined"
        );
        Ok(composition)
    }

    fn compose_locked(&self) -> Result<Composition> {
        let canvas = Mutex::new(self.blank_canvas());

        let placements = self
            .grid
            .cells()
            .into_par_iter()
            .map(|cell| {
                let (placement, tile) = self.resolve(cell)?;
                canvas.lock().blit(cell.region, tile.bitmap(), tile.origin());
                self.progress.tick();
                Ok(placement)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Composition {
            canvas: canvas.into_inner(),
            placements,
        })
    }

    fn compose_partitioned(&self) -> Result<Composition> {
        let mut canvas = self.blank_canvas();

        let rows = canvas
            .bands_mut(self.grid.cell_height())
            .map(|mut band| self.paint_band(&mut band))
            .collect::<Result<Vec<_>>>()?;

        Ok(Composition {
            canvas,
            placements: rows.into_iter().flatten().collect(),
        })
    }

    fn paint_band(&self, band: &mut CanvasBand<'_>) -> Result<Vec<Placement>> {
        let row = band.y() / self.grid.cell_height();
        self.grid
            .row_cells(row)
            .map(|cell| {
                let (placement, tile) = self.resolve(cell)?;
                band.blit(cell.region, tile.bitmap(), tile.origin());
                self.progress.tick();
                Ok(placement)
            })
            .collect()
    }

    fn compose_sequential(&self) -> Result<Composition> {
        let mut canvas = self.blank_canvas();
        let mut placements = Vec::with_capacity(self.grid.cell_count());

        for cell in self.grid.cells() {
            let (placement, tile) = self.resolve(cell)?;
            canvas.blit(cell.region, tile.bitmap(), tile.origin());
            self.progress.tick();
            placements.push(placement);
        }

        Ok(Composition { canvas, placements })
    }

    fn blank_canvas(&self) -> Canvas {
        Canvas::new(self.grid.width(), self.grid.height())
    }

    fn resolve(&self, cell: Cell) -> Result<(Placement, &'a Tile)> {
        let query = average_color(self.source, cell.region)?;
        let tile = nearest_tile(query, self.catalog).ok_or_else(detached_empty_catalog)?;

        let placement = Placement {
            cell,
            query,
            tile_id: tile.id().to_string(),
            distance: euclidean_distance(query, tile.average_color()),
        };
        Ok((placement, tile))
    }
}

/// Composite `source` with tiles from `catalog` and return the finished pixels
///
/// # Errors
///
/// Same conditions as [`MosaicCompositor::new`] and [`MosaicCompositor::compose`]
pub fn compose_image(
    source: &Rgb16Image,
    catalog: &Catalog,
    grid: Grid,
    strategy: CanvasStrategy,
) -> Result<Rgb16Image> {
    let composition = MosaicCompositor::new(source, catalog, grid)?
        .with_strategy(strategy)
        .compose()?;
    Ok(composition.canvas.into_image())
}
