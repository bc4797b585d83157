//! Structured logging to stderr through `tracing`

use crate::io::progress::ProgressLogWriter;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level implied by the command-line verbosity flags
///
/// `--quiet` wins over any number of `-v`.
pub const fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the event filter, letting `RUST_LOG` override the flag-derived level
pub fn env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for(verbose, quiet).into())
        .from_env_lossy()
}

/// Install the global subscriber, writing through `writer` so events emitted
/// mid-phase suspend the progress bars instead of tearing them
///
/// Returns `false` if a subscriber was already installed, which leaves the
/// existing one in place.
pub fn init_logging(verbose: u8, quiet: bool, writer: ProgressLogWriter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet))
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .is_ok()
}
