//! Common link types: system configuration, bit sequences and stage traits

use crate::{ModemError, Result};
use asklink_core::buffer::Waveform;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Generic modulator trait
pub trait Modulator {
    /// Map bits to a sampled waveform with its time axis
    fn modulate(&self, bits: &BitSequence) -> Result<Waveform>;

    /// Get samples per bit
    fn samples_per_bit(&self) -> usize;

    /// Get bit rate
    fn bit_rate(&self) -> f64;
}

/// Generic demodulator trait
pub trait Demodulator {
    /// Recover `bit_count` bits from received samples
    fn demodulate(&self, samples: &[f64], bit_count: usize) -> Result<BitSequence>;
}

/// Raw system parameters as they appear in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// Bit rate in bits per second
    pub bit_rate: f64,
    /// Carrier frequency in Hz
    pub carrier_frequency: f64,
    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl Default for SystemParams {
    fn default() -> Self {
        Self {
            bit_rate: 1000.0,
            carrier_frequency: 5000.0,
            sample_rate: 44100.0,
        }
    }
}

/// Validated link configuration.
///
/// Immutable once built. `samples_per_bit` is `floor(sample_rate / bit_rate)`
/// and is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SystemParams", into = "SystemParams")]
pub struct SystemConfig {
    bit_rate: f64,
    carrier_frequency: f64,
    sample_rate: f64,
    bit_duration: f64,
    samples_per_bit: usize,
}

impl SystemConfig {
    /// Create a new system configuration
    pub fn new(bit_rate: f64, carrier_frequency: f64, sample_rate: f64) -> Result<Self> {
        for (name, value) in [
            ("bit rate", bit_rate),
            ("carrier frequency", carrier_frequency),
            ("sample rate", sample_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModemError::InvalidConfig {
                    msg: format!("{} must be a positive finite number, got {}", name, value),
                });
            }
        }

        if sample_rate < bit_rate {
            return Err(ModemError::InvalidConfig {
                msg: format!(
                    "sample rate {} is below bit rate {}: fewer than one sample per bit",
                    sample_rate, bit_rate
                ),
            });
        }

        let ratio = (sample_rate / bit_rate).floor();
        if ratio > u32::MAX as f64 {
            return Err(ModemError::InvalidConfig {
                msg: format!(
                    "sample rate {} over bit rate {} gives {} samples per bit",
                    sample_rate, bit_rate, ratio
                ),
            });
        }
        let samples_per_bit = ratio as usize;
        let bit_duration = 1.0 / bit_rate;

        debug!(bit_rate, carrier_frequency, sample_rate, samples_per_bit, "system configured");

        Ok(Self {
            bit_rate,
            carrier_frequency,
            sample_rate,
            bit_duration,
            samples_per_bit,
        })
    }

    pub fn bit_rate(&self) -> f64 {
        self.bit_rate
    }

    pub fn carrier_frequency(&self) -> f64 {
        self.carrier_frequency
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Duration of one bit in seconds
    pub fn bit_duration(&self) -> f64 {
        self.bit_duration
    }

    /// Get samples per bit
    pub fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }

    /// Number of samples a modulated sequence of `bit_count` bits occupies
    pub fn samples_for(&self, bit_count: usize) -> Result<usize> {
        bit_count
            .checked_mul(self.samples_per_bit)
            .ok_or_else(|| ModemError::InvalidConfig {
                msg: format!(
                    "{} bits at {} samples per bit overflow the sample count",
                    bit_count, self.samples_per_bit
                ),
            })
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        let p = SystemParams::default();
        Self {
            bit_rate: p.bit_rate,
            carrier_frequency: p.carrier_frequency,
            sample_rate: p.sample_rate,
            bit_duration: 1.0 / p.bit_rate,
            samples_per_bit: (p.sample_rate / p.bit_rate).floor() as usize,
        }
    }
}

impl TryFrom<SystemParams> for SystemConfig {
    type Error = ModemError;

    fn try_from(params: SystemParams) -> Result<Self> {
        Self::new(params.bit_rate, params.carrier_frequency, params.sample_rate)
    }
}

impl From<SystemConfig> for SystemParams {
    fn from(config: SystemConfig) -> Self {
        Self {
            bit_rate: config.bit_rate,
            carrier_frequency: config.carrier_frequency,
            sample_rate: config.sample_rate,
        }
    }
}

/// Ordered sequence of binary values, each 0 or 1
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct BitSequence(Vec<u8>);

impl BitSequence {
    /// Create a bit sequence, rejecting values other than 0 and 1
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if let Some((pos, value)) = bits.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(ModemError::InvalidParameters {
                msg: format!("bit {} has non-binary value {}", pos, value),
            });
        }
        Ok(Self(bits))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Number of 1 bits
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&b| b == 1).count()
    }
}

impl TryFrom<Vec<u8>> for BitSequence {
    type Error = ModemError;

    fn try_from(bits: Vec<u8>) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<BitSequence> for Vec<u8> {
    fn from(bits: BitSequence) -> Self {
        bits.0
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().map(u8::from).collect())
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, bit) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", bit)?;
        }
        write!(f, "]")
    }
}
