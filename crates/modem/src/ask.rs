//! On-off keyed amplitude-shift keying (ASK)
//!
//! A 1 bit transmits `amplitude * sin(2π fc t)` for its whole window, a 0 bit
//! transmits silence. The carrier phase follows the global time axis, so it
//! runs on uninterrupted across bit boundaries.
//!
//! Reception is non-coherent envelope detection: full-wave rectification,
//! a causal low-pass filter, one sample at the middle of each bit window and
//! a fixed threshold decision.

use crate::common::{BitSequence, Demodulator, Modulator, SystemConfig};
use crate::{ModemError, Result};
use asklink_core::buffer::Waveform;
use asklink_core::filter::{IirFilter, LowPassFilter};
use std::f64::consts::PI;
use tracing::debug;

/// Order of the default envelope low-pass filter
pub const ENVELOPE_FILTER_ORDER: usize = 5;

/// ASK modulator
#[derive(Debug, Clone)]
pub struct AskModulator {
    config: SystemConfig,
    amplitude: f64,
}

impl AskModulator {
    /// Create a new ASK modulator
    pub fn new(config: SystemConfig, amplitude: f64) -> Result<Self> {
        if !amplitude.is_finite() {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid amplitude: {}", amplitude),
            });
        }

        Ok(Self { config, amplitude })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Time axis for `bit_count` bits: `[0, bit_count * bit_duration)` split
    /// into exactly `bit_count * samples_per_bit` evenly spaced points.
    pub fn time_axis(&self, bit_count: usize) -> Result<Vec<f64>> {
        let total = self.config.samples_for(bit_count)?;
        if total == 0 {
            return Ok(Vec::new());
        }
        let step = bit_count as f64 * self.config.bit_duration() / total as f64;
        Ok((0..total).map(|k| k as f64 * step).collect())
    }
}

impl Modulator for AskModulator {
    fn modulate(&self, bits: &BitSequence) -> Result<Waveform> {
        let samples_per_bit = self.config.samples_per_bit();
        let omega = 2.0 * PI * self.config.carrier_frequency();

        let times = self.time_axis(bits.len())?;
        let mut samples = vec![0.0; times.len()];

        for (i, bit) in bits.iter().enumerate() {
            if bit == 0 {
                continue;
            }
            let window = i * samples_per_bit..(i + 1) * samples_per_bit;
            for (sample, &t) in samples[window.clone()].iter_mut().zip(&times[window]) {
                *sample = self.amplitude * (omega * t).sin();
            }
        }

        debug!(
            bits = bits.len(),
            samples = samples.len(),
            amplitude = self.amplitude,
            "ASK modulated"
        );

        Ok(Waveform::new(samples, times, self.config.sample_rate())?)
    }

    fn samples_per_bit(&self) -> usize {
        self.config.samples_per_bit()
    }

    fn bit_rate(&self) -> f64 {
        self.config.bit_rate()
    }
}

/// ASK envelope demodulator, generic over the low-pass stage
#[derive(Debug, Clone)]
pub struct AskDemodulator<F = IirFilter> {
    config: SystemConfig,
    threshold: f64,
    filter: F,
}

impl AskDemodulator<IirFilter> {
    /// Create a demodulator with a 5th-order Butterworth envelope filter
    /// whose cutoff sits at the carrier frequency.
    pub fn new(config: SystemConfig, threshold: f64) -> Result<Self> {
        let filter = IirFilter::butterworth_lowpass(
            ENVELOPE_FILTER_ORDER,
            config.carrier_frequency(),
            config.sample_rate(),
        )?;
        Self::with_filter(config, threshold, filter)
    }
}

impl<F: LowPassFilter> AskDemodulator<F> {
    /// Create a demodulator with a caller-supplied low-pass stage
    pub fn with_filter(config: SystemConfig, threshold: f64, filter: F) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid decision threshold: {}", threshold),
            });
        }

        debug!(cutoff_hz = filter.cutoff_hz(), threshold, "envelope detector ready");

        Ok(Self {
            config,
            threshold,
            filter,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Rectified and low-pass filtered signal
    pub fn envelope(&self, samples: &[f64]) -> Vec<f64> {
        let rectified: Vec<f64> = samples.iter().map(|s| s.abs()).collect();
        self.filter.apply(&rectified)
    }

    /// Decision index for each bit: the middle of its sample window
    pub fn sampling_instants(&self, bit_count: usize) -> Vec<usize> {
        let samples_per_bit = self.config.samples_per_bit() as f64;
        (0..bit_count)
            .map(|i| ((i as f64 + 0.5) * samples_per_bit).floor() as usize)
            .collect()
    }
}

impl<F: LowPassFilter> Demodulator for AskDemodulator<F> {
    fn demodulate(&self, samples: &[f64], bit_count: usize) -> Result<BitSequence> {
        let expected = self.config.samples_for(bit_count)?;
        if samples.len() != expected {
            return Err(ModemError::PreconditionViolation {
                msg: format!(
                    "{} bits need {} samples, received {}",
                    bit_count,
                    expected,
                    samples.len()
                ),
            });
        }

        let envelope = self.envelope(samples);

        let bits = self
            .sampling_instants(bit_count)
            .into_iter()
            .map(|idx| {
                envelope
                    .get(idx)
                    .map(|&level| level > self.threshold)
                    .ok_or_else(|| ModemError::PreconditionViolation {
                        msg: format!("sampling index {} outside filtered signal", idx),
                    })
            })
            .collect::<Result<BitSequence>>()?;

        debug!(bits = bits.len(), threshold = self.threshold, "ASK demodulated");

        Ok(bits)
    }
}
