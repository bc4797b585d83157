//! Error types for the catalog, compositing and persistence phases

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to open or decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or write the finished mosaic
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Tile count too large for the source image dimensions
    ///
    /// Raised when `width / tile_count` or `height / tile_count` rounds down
    /// to zero, before any tile is decoded.
    InvalidGrid {
        /// Source image width in pixels
        width: u32,
        /// Source image height in pixels
        height: u32,
        /// Requested number of tiles along each edge
        tile_count: u32,
    },

    /// No candidate in the tile directory survived filtering and decoding
    EmptyCatalog {
        /// Directory the candidates were listed from, if any
        source_dir: Option<PathBuf>,
        /// Number of candidate names considered
        candidates: usize,
    },

    /// Colour averaging was asked for a region with no pixels
    EmptyRegion {
        /// Requested region as (x, y, width, height)
        region: (u32, u32, u32, u32),
        /// Dimensions of the image the region was clipped against
        bounds: (u32, u32),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidGrid {
                width,
                height,
                tile_count,
            } => {
                let divisor = (*tile_count).max(1);
                write!(
                    f,
                    "Cannot split {width}x{height} image into {tile_count} tiles per edge \
                     (cell size {}x{} must be > 0)",
                    width / divisor,
                    height / divisor
                )
            }
            Self::EmptyCatalog {
                source_dir: Some(dir),
                candidates,
            } => {
                write!(
                    f,
                    "No usable tile images in '{}' ({candidates} candidates considered)",
                    dir.display()
                )
            }
            Self::EmptyCatalog {
                source_dir: None,
                candidates,
            } => {
                write!(f, "Tile catalog is empty ({candidates} candidates considered)")
            }
            Self::EmptyRegion { region, bounds } => {
                write!(
                    f,
                    "Region at ({}, {}) of size {}x{} has no pixels inside {}x{} image",
                    region.0, region.1, region.2, region.3, bounds.0, bounds.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
