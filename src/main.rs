//! CLI entry point for the photomosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicCommand};
use photomosaic::io::logging::init_logging;

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    let command = MosaicCommand::new(&cli);
    init_logging(cli.verbose, cli.quiet, command.log_writer());

    let report = command.run()?;
    tracing::debug!(
        candidates = report.candidates,
        tiles = report.tiles,
        filtered = report.filtered,
        failed = report.failed,
        "done"
    );
    Ok(())
}
