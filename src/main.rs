//! CLI entry point for batch dungeon map generation

use castlegen::io::cli::{BatchRunner, Cli};
use castlegen::io::logging::init_logging;
use clap::Parser;

fn main() -> castlegen::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let mut runner = BatchRunner::new(cli)?;
    runner.run()?;
    Ok(())
}
