//! Pipeline constants and runtime configuration defaults

// Command-line defaults
/// Source image used when `-i` is not given
pub const DEFAULT_IMAGE_PATH: &str = "origImage.jpg";
/// Number of tiles along each image edge
pub const DEFAULT_TILE_COUNT: u32 = 10;
/// Directory scanned for candidate tile images
pub const DEFAULT_TILES_DIR: &str = "./images/";
/// Path the finished mosaic is written to
pub const DEFAULT_OUTPUT_PATH: &str = "mosaic.jpg";

// Output settings
/// JPEG encode quality for the finished mosaic
pub const JPEG_QUALITY: u8 = 80;
/// Lowest accepted JPEG quality
pub const MIN_JPEG_QUALITY: u8 = 1;
/// Highest accepted JPEG quality
pub const MAX_JPEG_QUALITY: u8 = 100;

// Case-sensitive suffixes, matched after the final dot
/// File extensions accepted as tile candidates
pub const TILE_EXTENSIONS: [&str; 4] = ["jpg", "JPG", "jpeg", "JPEG"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
