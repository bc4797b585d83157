//! Concurrent tile catalog construction
//!
//! Every candidate file is filtered, decoded, resized to the cell width and
//! averaged by its own task. The catalog is handed out only after all tasks
//! have joined, so the compositing phase never observes a partial catalog.

use crate::catalog::tile::{Catalog, Tile};
use crate::io::configuration::TILE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::io::image::decode_image;
use crate::io::progress::PhaseProgress;
use clap::ValueEnum;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// How finished tiles are gathered into the shared catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CatalogStrategy {
    /// Tasks send tiles over a channel drained by one consumer after the join
    #[default]
    Channel,
    /// Tasks insert directly into a lock-protected catalog
    Mutex,
    /// Candidates are processed one after another on the calling thread
    Sequential,
}

impl fmt::Display for CatalogStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Channel => "channel",
            Self::Mutex => "mutex",
            Self::Sequential => "sequential",
        };
        f.write_str(name)
    }
}

/// Whether a filename carries one of the accepted case-sensitive JPEG suffixes
pub fn is_tile_candidate(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, extension)| TILE_EXTENSIONS.contains(&extension))
}

// Result of one candidate task
enum CandidateOutcome {
    Accepted(Tile),
    Filtered,
    Failed,
}

/// Catalog produced by a build together with how many candidates were dropped
#[derive(Debug)]
pub struct CatalogBuild {
    /// Tiles that decoded successfully
    pub catalog: Catalog,
    /// Number of candidate names considered
    pub candidates: usize,
    /// Candidates rejected by the extension filter
    pub filtered: usize,
    /// Candidates that could not be opened or decoded
    pub failed: usize,
}

#[derive(Default)]
struct Tally {
    catalog: Catalog,
    filtered: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, outcome: CandidateOutcome) {
        match outcome {
            CandidateOutcome::Accepted(tile) => {
                if let Some(previous) = self.catalog.insert(tile) {
                    tracing::debug!(tile = previous.id(), "duplicate tile id replaced");
                }
            }
            CandidateOutcome::Filtered => self.filtered += 1,
            CandidateOutcome::Failed => self.failed += 1,
        }
    }
}

/// Builds an immutable [`Catalog`] from a directory of candidate images
#[derive(Clone, Debug)]
pub struct TileCatalogBuilder {
    tiles_dir: PathBuf,
    cell_width: u32,
    strategy: CatalogStrategy,
    progress: PhaseProgress,
}

impl TileCatalogBuilder {
    /// Create a builder reading candidates from `tiles_dir` and resizing them to `cell_width`
    pub fn new(tiles_dir: impl Into<PathBuf>, cell_width: u32) -> Self {
        Self {
            tiles_dir: tiles_dir.into(),
            cell_width,
            strategy: CatalogStrategy::default(),
            progress: PhaseProgress::hidden(),
        }
    }

    /// Select how tiles are aggregated
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CatalogStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Report each finished candidate to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: PhaseProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Directory candidates are read from
    pub fn tiles_dir(&self) -> &Path {
        &self.tiles_dir
    }

    /// Width every tile is resized to
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// List file names in the tile directory, sorted
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::FileSystem`] if the directory cannot be read
    pub fn list_candidates(&self) -> Result<Vec<String>> {
        let list_error = |e| MosaicError::FileSystem {
            path: self.tiles_dir.clone(),
            operation: "list tile directory",
            source: e,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.tiles_dir).map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// List the tile directory and build a catalog from everything in it
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or no candidate
    /// produces a usable tile
    pub fn build_from_directory(&self) -> Result<CatalogBuild> {
        let candidates = self.list_candidates()?;
        self.build(&candidates)
    }

    /// Build a catalog from candidate file names relative to the tile directory
    ///
    /// Filtered and undecodable candidates are skipped without failing the build.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyCatalog`] if no candidate produced a tile
    pub fn build(&self, candidates: &[String]) -> Result<CatalogBuild> {
        self.progress.set_length(candidates.len() as u64);

        let tally = match self.strategy {
            CatalogStrategy::Channel => self.build_with_channel(candidates),
            CatalogStrategy::Mutex => self.build_with_mutex(candidates),
            CatalogStrategy::Sequential => self.build_sequential(candidates),
        };

        if tally.catalog.is_empty() {
            return Err(MosaicError::EmptyCatalog {
                source_dir: Some(self.tiles_dir.clone()),
                candidates: candidates.len(),
            });
        }

        tracing::debug!(
            tiles = tally.catalog.len(),
            filtered = tally.filtered,
            failed = tally.failed,
            strategy = %self.strategy,
            "catalog build joined"
        );

        Ok(CatalogBuild {
            catalog: tally.catalog,
            candidates: candidates.len(),
            filtered: tally.filtered,
            failed: tally.failed,
        })
    }

    fn build_with_channel(&self, candidates: &[String]) -> Tally {
        let (sender, receiver) = crossbeam_channel::unbounded();

        rayon::scope(|scope| {
            for name in candidates {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    // Receiver outlives the scope, so the send cannot fail
                    let _ = sender.send(self.process_candidate(name));
                });
            }
        });
        drop(sender);

        let mut tally = Tally::default();
        for outcome in receiver {
            tally.record(outcome);
        }
        tally
    }

    fn build_with_mutex(&self, candidates: &[String]) -> Tally {
        let shared = Mutex::new(Tally::default());

        candidates.par_iter().for_each(|name| {
            let outcome = self.process_candidate(name);
            shared.lock().record(outcome);
        });

        shared.into_inner()
    }

    fn build_sequential(&self, candidates: &[String]) -> Tally {
        let mut tally = Tally::default();
        for name in candidates {
            tally.record(self.process_candidate(name));
        }
        tally
    }

    fn process_candidate(&self, name: &str) -> CandidateOutcome {
        let outcome = self.load_candidate(name);
        self.progress.tick();
        outcome
    }

    fn load_candidate(&self, name: &str) -> CandidateOutcome {
        if !is_tile_candidate(name) {
            tracing::debug!(file = name, "skipping non-JPEG candidate");
            return CandidateOutcome::Filtered;
        }

        let path = self.tiles_dir.join(name);
        let tile = decode_image(&path)
            .and_then(|decoded| Tile::from_image(name, &decoded, self.cell_width));

        match tile {
            Ok(tile) => {
                tracing::trace!(
                    file = name,
                    r = tile.average_color().r,
                    g = tile.average_color().g,
                    b = tile.average_color().b,
                    "tile indexed"
                );
                CandidateOutcome::Accepted(tile)
            }
            Err(error) => {
                tracing::warn!(file = name, %error, "skipping unreadable tile");
                CandidateOutcome::Failed
            }
        }
    }
}
