//! Command-line interface

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::common::GlobalConfig;
use crate::config::SimulationConfig;
use crate::simulate::{self, RunArgs};
use crate::sweep::{self, SweepArgs};

/// ASK link simulator
#[derive(Debug, Parser)]
#[command(name = "asklink")]
#[command(about = "On-off keyed ASK link simulation with AWGN and envelope detection")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalConfig,
    
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send random bits through the link once and report the BER
    Run(RunArgs),
    /// Measure BER over a range of SNR values
    Sweep(SweepArgs),
    /// Write a default configuration file
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InitConfigArgs {
    /// Destination (TOML, or JSON by extension)
    pub path: PathBuf,
    
    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

fn init_config(args: &InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!("{:?} already exists, pass --force to overwrite", args.path);
    }
    
    SimulationConfig::default()
        .save_to_file(&args.path)
        .with_context(|| format!("Failed to create {:?}", args.path))?;
    
    info!("Default configuration written to {:?}", args.path);
    Ok(())
}

impl Cli {
    pub fn dispatch(&self) -> Result<()> {
        match &self.command {
            Commands::Run(args) => simulate::execute(args),
            Commands::Sweep(args) => sweep::execute(args),
            Commands::InitConfig(args) => init_config(args),
        }
    }
}
