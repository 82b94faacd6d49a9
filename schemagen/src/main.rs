//! Entity description generator.
//!
//! Connects to a database, reads its catalog metadata and writes one JSON
//! entity description per table.
//!
//! # Guarantees
//! - Read-only catalog access over a single connection
//! - No credentials stored or logged
//! - The connection is released on every exit path

use clap::Parser;
use schemagen::{Cli, run};
use schemagen_core::{Result, init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    run(&cli).await?;
    Ok(())
}
