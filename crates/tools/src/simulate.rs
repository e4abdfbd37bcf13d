//! Single link run: the example driver

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use asklink_modem::prelude::*;

use crate::config::SimulationConfig;
use crate::trace::WaveformTrace;

/// Options for `asklink run`. Flags override values from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Configuration file (TOML, or JSON by extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    
    /// Bit rate in bits per second
    #[arg(long)]
    pub bit_rate: Option<f64>,
    
    /// Carrier frequency in Hz
    #[arg(long)]
    pub carrier: Option<f64>,
    
    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,
    
    /// Number of bits to transmit
    #[arg(short = 'n', long)]
    pub bits: Option<usize>,
    
    /// Carrier amplitude
    #[arg(short, long)]
    pub amplitude: Option<f64>,
    
    /// Channel SNR in dB
    #[arg(long, allow_hyphen_values = true)]
    pub snr_db: Option<f64>,
    
    /// Skip the noise stage
    #[arg(long, conflicts_with = "snr_db")]
    pub no_noise: bool,
    
    /// Envelope decision threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,
    
    /// Seed for reproducible bits and noise
    #[arg(short, long)]
    pub seed: Option<u64>,
    
    /// Write time axis, modulated and noisy waveforms as JSON
    #[arg(long)]
    pub trace: Option<PathBuf>,
}

impl RunArgs {
    /// Resolve the effective configuration: defaults, then file, then flags
    pub fn resolve(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        
        if let Some(v) = self.bit_rate {
            config.system.bit_rate = v;
        }
        if let Some(v) = self.carrier {
            config.system.carrier_frequency = v;
        }
        if let Some(v) = self.sample_rate {
            config.system.sample_rate = v;
        }
        if let Some(v) = self.bits {
            config.bits = v;
        }
        if let Some(v) = self.amplitude {
            config.amplitude = v;
        }
        if let Some(v) = self.snr_db {
            config.snr_db = Some(v);
        }
        if self.no_noise {
            config.snr_db = None;
        }
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        
        Ok(config)
    }
}

/// Run the link once as described by `config`
pub fn simulate(config: &SimulationConfig) -> Result<LinkOutcome> {
    let system = config.system_config()?;
    let link = AskLink::new(system, config.link_params())?;
    
    info!(
        bits = config.bits,
        snr_db = ?config.snr_db,
        samples_per_bit = system.samples_per_bit(),
        threshold = link.demodulator().threshold(),
        "running ASK link"
    );
    
    let outcome = match config.seed {
        Some(seed) => link.run_seeded(config.bits, seed)?,
        None => {
            let mut source = BitSource::from_entropy();
            let mut channel = AwgnChannel::from_entropy();
            link.run(config.bits, &mut source, &mut channel)?
        }
    };
    
    Ok(outcome)
}

/// Human-readable result lines
pub fn format_report(outcome: &LinkOutcome) -> String {
    format!(
        "Transmitted bits: {}\nRecovered bits: {}\nBit error rate (BER): {:.2}",
        outcome.bits, outcome.recovered, outcome.ber
    )
}

/// `asklink run`
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = args.resolve()?;
    let outcome = simulate(&config)?;
    
    println!("{}", format_report(&outcome));
    
    if let Some(path) = &args.trace {
        WaveformTrace::from_outcome(&outcome)?.write_json(path)?;
        info!("Trace written to {:?}", path);
    }
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_flags_override_defaults() {
        let args = RunArgs {
            bits: Some(32),
            snr_db: Some(-3.0),
            seed: Some(9),
            ..RunArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.bits, 32);
        assert_eq!(config.snr_db, Some(-3.0));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.threshold, 0.5);
    }

    #[test]
    fn test_no_noise_clears_snr() {
        let args = RunArgs { no_noise: true, ..RunArgs::default() };
        assert_eq!(args.resolve().unwrap().snr_db, None);
    }

    #[test]
    fn test_simulate_demo_scenario() {
        let config = SimulationConfig { seed: Some(1), ..SimulationConfig::default() };
        let outcome = simulate(&config).unwrap();
        assert_eq!(outcome.recovered.len(), 10);
        assert!((0.0..=1.0).contains(&outcome.ber));
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let args = RunArgs { bit_rate: Some(50_000.0), ..RunArgs::default() };
        let config = args.resolve().unwrap();
        assert!(simulate(&config).is_err());
    }

    #[test]
    fn test_report_format() {
        let config = SimulationConfig {
            snr_db: None,
            seed: Some(3),
            bits: 4,
            ..SimulationConfig::default()
        };
        let outcome = simulate(&config).unwrap();
        let report = format_report(&outcome);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("Transmitted bits: {}", outcome.bits));
        assert_eq!(lines[2], "Bit error rate (BER): 0.00");
    }

    #[quickcheck]
    fn prop_ideal_run_is_error_free(seed: u64, bits: u8) -> bool {
        let config = SimulationConfig {
            bits: bits as usize,
            snr_db: None,
            seed: Some(seed),
            ..SimulationConfig::default()
        };
        let outcome = simulate(&config).unwrap();
        outcome.bit_errors == 0 && outcome.recovered == outcome.bits
    }
}
