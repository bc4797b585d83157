//! Command-line interface for building a photomosaic from a tile directory

use crate::catalog::builder::CatalogStrategy;
use crate::io::configuration::{
    DEFAULT_IMAGE_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_TILE_COUNT, DEFAULT_TILES_DIR, JPEG_QUALITY,
};
use crate::io::error::Result;
use crate::io::progress::{ProgressLogWriter, ProgressManager};
use crate::mosaic::compositor::CanvasStrategy;
use crate::mosaic::pipeline::{MosaicConfig, MosaicPipeline, MosaicReport};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image from tiles whose average colour matches each cell"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Source image path
    #[arg(short = 'i', long = "image", default_value = DEFAULT_IMAGE_PATH)]
    pub image: PathBuf,

    /// Number of tiles along the image edge
    #[arg(short = 't', long = "tiles", default_value_t = DEFAULT_TILE_COUNT)]
    pub tiles: u32,

    /// Directory of candidate tile images
    #[arg(short = 'd', long, default_value = DEFAULT_TILES_DIR)]
    pub tiles_dir: PathBuf,

    /// Output JPEG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// JPEG encode quality (1-100)
    #[arg(long, default_value_t = JPEG_QUALITY)]
    pub quality: u8,

    /// How decoded tiles are gathered into the catalog
    #[arg(long, value_enum, default_value_t = CatalogStrategy::Channel)]
    pub catalog_strategy: CatalogStrategy,

    /// How cell tasks share the output canvas
    #[arg(long, value_enum, default_value_t = CanvasStrategy::Locked)]
    pub canvas_strategy: CanvasStrategy,

    /// Suppress progress bars and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline configuration described by these arguments
    pub fn config(&self) -> MosaicConfig {
        MosaicConfig {
            image_path: self.image.clone(),
            tiles_dir: self.tiles_dir.clone(),
            output_path: self.output.clone(),
            tile_count: self.tiles,
            quality: self.quality,
            catalog_strategy: self.catalog_strategy,
            canvas_strategy: self.canvas_strategy,
        }
    }
}

/// Runs the pipeline described by parsed arguments
pub struct MosaicCommand {
    pipeline: MosaicPipeline,
}

impl MosaicCommand {
    /// Create a command, with progress bars unless `--quiet` was given
    pub fn new(cli: &Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            pipeline: MosaicPipeline::new(cli.config()).with_progress(progress),
        }
    }

    /// Log sink that shares the terminal with this command's progress bars
    pub fn log_writer(&self) -> ProgressLogWriter {
        self.pipeline.progress().log_writer()
    }

    /// Build and write the mosaic
    ///
    /// # Errors
    ///
    /// Returns any fatal pipeline error: unreadable source image, grid too
    /// fine for the image, unlistable tile directory, empty catalog, or an
    /// output file that cannot be written
    pub fn run(&self) -> Result<MosaicReport> {
        let config = self.pipeline.config();
        tracing::info!(
            image = %config.image_path.display(),
            tiles = config.tile_count,
            catalog_strategy = %config.catalog_strategy,
            canvas_strategy = %config.canvas_strategy,
            "building mosaic"
        );
        self.pipeline.run()
    }
}
