//! Waveform trace export for external plotting

use anyhow::{Context, Result};
use asklink_modem::link::LinkOutcome;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Time axis, modulated waveform and channel output as equal-length arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformTrace {
    pub time: Vec<f64>,
    pub modulated: Vec<f64>,
    pub noisy: Vec<f64>,
}

impl WaveformTrace {
    pub fn new(time: Vec<f64>, modulated: Vec<f64>, noisy: Vec<f64>) -> Result<Self> {
        if time.len() != modulated.len() || time.len() != noisy.len() {
            anyhow::bail!(
                "Trace arrays differ in length: time {}, modulated {}, noisy {}",
                time.len(),
                modulated.len(),
                noisy.len()
            );
        }
        Ok(Self { time, modulated, noisy })
    }
    
    pub fn from_outcome(outcome: &LinkOutcome) -> Result<Self> {
        Self::new(
            outcome.waveform.times().to_vec(),
            outcome.waveform.samples().to_vec(),
            outcome.noisy.clone(),
        )
    }
    
    pub fn len(&self) -> usize {
        self.time.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    
    /// Write the trace as JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write trace file: {:?}", path))
    }
}
