//! Contree CLI Binary
//!
//! Prints permission-filtered content trees from a fixture file.

use anyhow::Context;
use clap::Parser;
use contree::logging::init_logging;
use contree::tooling::cli::{Cli, CliContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.resolve_config().context("loading configuration")?;
    init_logging(Some(&config.logging)).context("initializing logging")?;

    let context = CliContext::new(&cli.fixture, &config, !cli.no_color)
        .with_context(|| format!("loading fixture {}", cli.fixture.display()))?;
    let output = context.execute(&cli.command)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
