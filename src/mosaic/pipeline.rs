//! Two-phase mosaic pipeline: catalog build, then compositing, then persistence
//!
//! The phases never overlap. The catalog builder returns only after every
//! candidate task has joined, and the canvas is encoded only after every cell
//! task has joined.

use crate::catalog::builder::{CatalogBuild, CatalogStrategy, TileCatalogBuilder};
use crate::io::configuration::{
    DEFAULT_IMAGE_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_TILE_COUNT, DEFAULT_TILES_DIR, JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Rgb16Image, load_rgb16, save_jpeg};
use crate::io::progress::ProgressManager;
use crate::mosaic::compositor::{CanvasStrategy, MosaicCompositor};
use crate::mosaic::grid::Grid;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Everything the pipeline needs to turn one source image into a mosaic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Source image to reconstruct
    pub image_path: PathBuf,
    /// Directory of candidate tile images
    pub tiles_dir: PathBuf,
    /// Where the finished JPEG is written
    pub output_path: PathBuf,
    /// Tiles along each edge of the source
    pub tile_count: u32,
    /// JPEG encode quality (1-100)
    pub quality: u8,
    /// Aggregation used while building the catalog
    pub catalog_strategy: CatalogStrategy,
    /// Canvas sharing used while compositing
    pub canvas_strategy: CanvasStrategy,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            tiles_dir: PathBuf::from(DEFAULT_TILES_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            tile_count: DEFAULT_TILE_COUNT,
            quality: JPEG_QUALITY,
            catalog_strategy: CatalogStrategy::default(),
            canvas_strategy: CanvasStrategy::default(),
        }
    }
}

impl MosaicConfig {
    /// Check parameters that can be rejected before touching the filesystem
    ///
    /// # Errors
    ///
    /// Returns [`crate::MosaicError::InvalidParameter`] for a zero tile count
    /// or a quality outside 1-100
    pub fn validate(&self) -> Result<()> {
        if self.tile_count == 0 {
            return Err(invalid_parameter(
                "tile_count",
                &self.tile_count,
                &"must be at least 1",
            ));
        }
        if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&self.quality) {
            return Err(invalid_parameter(
                "quality",
                &self.quality,
                &format!("must be between {MIN_JPEG_QUALITY} and {MAX_JPEG_QUALITY}"),
            ));
        }
        Ok(())
    }
}

/// Summary of a finished pipeline run
#[derive(Clone, Debug)]
pub struct MosaicReport {
    /// Grid the source was split into
    pub grid: Grid,
    /// Candidate names found in the tile directory
    pub candidates: usize,
    /// Tiles that made it into the catalog
    pub tiles: usize,
    /// Candidates rejected by the extension filter
    pub filtered: usize,
    /// Candidates that failed to open or decode
    pub failed: usize,
    /// Wall time of the catalog phase
    pub catalog_time: Duration,
    /// Wall time of the compositing phase
    pub composite_time: Duration,
    /// Where the mosaic was written, if it was persisted
    pub output_path: Option<PathBuf>,
}

/// Runs the catalog and compositing phases in order and persists the result
pub struct MosaicPipeline {
    config: MosaicConfig,
    progress: ProgressManager,
}

impl MosaicPipeline {
    /// Create a pipeline with hidden progress bars
    pub fn new(config: MosaicConfig) -> Self {
        Self {
            config,
            progress: ProgressManager::hidden(),
        }
    }

    /// Draw per-phase progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Configuration in use
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Progress bars drawn while the phases run
    pub const fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// Run both phases and return the finished pixels without writing them
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The source image cannot be opened or decoded
    /// - The tile count is too large for the source dimensions
    /// - The tile directory cannot be listed
    /// - No tile could be decoded
    pub fn render(&self) -> Result<(Rgb16Image, MosaicReport)> {
        self.config.validate()?;

        let source = load_rgb16(&self.config.image_path)?;
        let grid = Grid::new(source.width(), source.height(), self.config.tile_count)?;
        tracing::info!(
            image = %self.config.image_path.display(),
            width = grid.width(),
            height = grid.height(),
            cell_width = grid.cell_width(),
            cell_height = grid.cell_height(),
            cells = grid.cell_count(),
            "grid computed"
        );

        let started = Instant::now();
        let build = self.build_catalog(grid)?;
        let catalog_time = started.elapsed();
        tracing::info!(
            tiles = build.catalog.len(),
            skipped = build.filtered + build.failed,
            elapsed = ?catalog_time,
            "tile processing finished"
        );

        let started = Instant::now();
        let cells = self.progress.phase("cells", grid.cell_count() as u64);
        let composition = MosaicCompositor::new(&source, &build.catalog, grid)?
            .with_strategy(self.config.canvas_strategy)
            .with_progress(cells.clone())
            .compose()?;
        let composite_time = started.elapsed();
        cells.finish("painted");
        tracing::info!(elapsed = ?composite_time, "mosaic processing finished");

        let report = MosaicReport {
            grid,
            candidates: build.candidates,
            tiles: build.catalog.len(),
            filtered: build.filtered,
            failed: build.failed,
            catalog_time,
            composite_time,
            output_path: None,
        };
        Ok((composition.canvas.into_image(), report))
    }

    /// Render the mosaic and write it to the configured output path
    ///
    /// # Errors
    ///
    /// Returns any error from [`MosaicPipeline::render`], or an error if the
    /// output file cannot be created or encoded
    pub fn run(&self) -> Result<MosaicReport> {
        let (mosaic, mut report) = self.render()?;

        save_jpeg(&mosaic, &self.config.output_path, self.config.quality)?;
        self.progress.clear();
        tracing::info!(
            output = %self.config.output_path.display(),
            quality = self.config.quality,
            "mosaic written"
        );

        report.output_path = Some(self.config.output_path.clone());
        Ok(report)
    }

    fn build_catalog(&self, grid: Grid) -> Result<CatalogBuild> {
        let builder = TileCatalogBuilder::new(&self.config.tiles_dir, grid.cell_width())
            .with_strategy(self.config.catalog_strategy);
        let candidates = builder.list_candidates()?;

        let tiles = self.progress.phase("tiles", candidates.len() as u64);
        let build = builder.with_progress(tiles.clone()).build(&candidates)?;
        tiles.finish("indexed");
        Ok(build)
    }
}
