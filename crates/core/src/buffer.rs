//! Sampled waveform container

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Real-valued sampled waveform with its time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    samples: Vec<f64>,
    times: Vec<f64>,
    sample_rate: f64,
}

impl Waveform {
    /// Create a waveform from samples and matching time-stamps
    pub fn new(samples: Vec<f64>, times: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if sample_rate <= 0.0 || !sample_rate.is_finite() {
            return Err(CoreError::InvalidSampleRate { rate: sample_rate });
        }
        
        if samples.len() != times.len() {
            return Err(CoreError::BufferSizeMismatch {
                expected: samples.len(),
                actual: times.len(),
            });
        }
        
        Ok(Self { samples, times, sample_rate })
    }
    
    /// Create a waveform whose time axis starts at zero with spacing 1/sample_rate
    pub fn from_samples(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if sample_rate <= 0.0 || !sample_rate.is_finite() {
            return Err(CoreError::InvalidSampleRate { rate: sample_rate });
        }
        
        let times = (0..samples.len())
            .map(|k| k as f64 / sample_rate)
            .collect();
        
        Ok(Self { samples, times, sample_rate })
    }
    
    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
    
    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    
    /// Check if waveform is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    
    /// Amplitude samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
    
    /// Time-stamps in seconds, one per sample
    pub fn times(&self) -> &[f64] {
        &self.times
    }
    
    /// Mean square value over every sample
    pub fn power(&self) -> f64 {
        mean_power(&self.samples)
    }
}

impl Index<usize> for Waveform {
    type Output = f64;
    
    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

/// Average power (mean of squares). An empty slice has zero power.
pub fn mean_power(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}
