/// Command-line surface of the mosaic tool
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types shared by every pipeline stage
pub mod error;
/// Image codec capability: decode, resample and encode
pub mod image;
/// Tracing subscriber installation
pub mod logging;
/// Per-phase progress display
pub mod progress;
