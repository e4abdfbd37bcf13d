//! asklink - ASK link simulator

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use asklink_tools::{init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global)?;
    
    debug!("asklink {} starting", env!("CARGO_PKG_VERSION"));
    
    cli.dispatch()
}
