//! BER versus SNR sweep command

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use asklink_modem::prelude::{snr_range, SnrSweep, SweepPoint};

use crate::common::save_config;
use crate::config::SimulationConfig;

#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    /// Configuration file for link and system parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    
    /// First SNR value in dB
    #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
    pub snr_start: f64,
    
    /// Last SNR value in dB (inclusive)
    #[arg(long, default_value_t = 15.0, allow_hyphen_values = true)]
    pub snr_stop: f64,
    
    /// SNR increment in dB
    #[arg(long, default_value_t = 1.0)]
    pub snr_step: f64,
    
    /// Link runs per SNR value
    #[arg(long, default_value_t = 100)]
    pub trials: usize,
    
    /// Bits per run (defaults to the configured bit count)
    #[arg(short = 'n', long)]
    pub bits: Option<usize>,
    
    /// Master seed
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,
    
    /// Write the sweep table as JSON or TOML
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for SweepArgs {
    fn default() -> Self {
        Self {
            config: None,
            snr_start: -5.0,
            snr_stop: 15.0,
            snr_step: 1.0,
            trials: 100,
            bits: None,
            seed: 0,
            output: None,
        }
    }
}

/// Sweep output file layout
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepReport {
    pub config: SimulationConfig,
    pub trials: usize,
    pub seed: u64,
    pub points: Vec<SweepPoint>,
}

/// Run the sweep described by `args`
pub fn run_sweep(args: &SweepArgs) -> Result<SweepReport> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(bits) = args.bits {
        config.bits = bits;
    }
    
    let sweep = SnrSweep {
        snr_db: snr_range(args.snr_start, args.snr_stop, args.snr_step)?,
        trials: args.trials,
        bit_count: config.bits,
        seed: args.seed,
    };
    
    info!(
        points = sweep.snr_db.len(),
        trials = sweep.trials,
        bits = sweep.bit_count,
        "starting SNR sweep"
    );
    
    let points = sweep.run(config.system_config()?, config.amplitude, config.threshold)?;
    
    Ok(SweepReport {
        config,
        trials: args.trials,
        seed: args.seed,
        points,
    })
}

/// Tabular text rendering
pub fn format_table(points: &[SweepPoint]) -> String {
    let mut out = format!("{:>8}  {:>10}  {:>8}  {:>8}\n", "SNR(dB)", "BER", "errors", "bits");
    for p in points {
        out.push_str(&format!(
            "{:>8.2}  {:>10.6}  {:>8}  {:>8}\n",
            p.snr_db, p.ber, p.bit_errors, p.total_bits
        ));
    }
    out
}

/// `asklink sweep`
pub fn execute(args: &SweepArgs) -> Result<()> {
    let report = run_sweep(args)?;
    print!("{}", format_table(&report.points));
    
    if let Some(path) = &args.output {
        save_config(&report, path)?;
        info!("Sweep written to {:?}", path);
    }
    
    Ok(())
}
