//! Simulation configuration

use anyhow::{Context, Result};
use asklink_modem::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::{load_config, save_config};

/// Everything needed for one simulated link run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub system: SystemParams,
    
    /// Number of bits to transmit
    pub bits: usize,
    
    /// Carrier amplitude
    pub amplitude: f64,
    
    /// Channel SNR in dB, absent for an ideal channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr_db: Option<f64>,
    
    /// Envelope decision threshold
    pub threshold: f64,
    
    /// Seed for reproducible runs, absent for fresh entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let link = LinkParams::default();
        Self {
            system: SystemParams::default(),
            bits: 10,
            amplitude: link.amplitude,
            snr_db: link.snr_db,
            threshold: link.threshold,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path)
    }
    
    /// Save configuration to a TOML or JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }
    
    /// Validated system configuration
    pub fn system_config(&self) -> Result<SystemConfig> {
        SystemConfig::try_from(self.system).context("Invalid system parameters")
    }
    
    pub fn link_params(&self) -> LinkParams {
        LinkParams {
            amplitude: self.amplitude,
            snr_db: self.snr_db,
            threshold: self.threshold,
        }
    }
}
