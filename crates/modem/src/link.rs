//! End-to-end ASK link: source, modulator, channel, demodulator, evaluator

use crate::ask::{AskDemodulator, AskModulator};
use crate::ber::BerCounter;
use crate::channel::AwgnChannel;
use crate::common::{BitSequence, Demodulator, Modulator, SystemConfig};
use crate::source::BitSource;
use crate::{ModemError, Result};
use asklink_core::buffer::Waveform;
use asklink_core::filter::{IirFilter, LowPassFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-run link parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkParams {
    /// Carrier amplitude for 1 bits
    pub amplitude: f64,
    /// Channel SNR in dB; `None` bypasses the noise stage
    pub snr_db: Option<f64>,
    /// Envelope decision threshold
    pub threshold: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            snr_db: Some(5.0),
            threshold: 0.5,
        }
    }
}

/// Everything one pass through the link produced
#[derive(Debug, Clone)]
pub struct LinkOutcome {
    /// Transmitted bits
    pub bits: BitSequence,
    /// Modulated waveform with its time axis
    pub waveform: Waveform,
    /// Channel output, same length as `waveform`
    pub noisy: Vec<f64>,
    /// Demodulated bits
    pub recovered: BitSequence,
    /// Number of differing bits
    pub bit_errors: usize,
    /// Bit error rate
    pub ber: f64,
}

/// Configured ASK link
#[derive(Debug, Clone)]
pub struct AskLink<F = IirFilter> {
    config: SystemConfig,
    params: LinkParams,
    modulator: AskModulator,
    demodulator: AskDemodulator<F>,
}

impl AskLink<IirFilter> {
    /// Create a link with the default Butterworth envelope filter
    pub fn new(config: SystemConfig, params: LinkParams) -> Result<Self> {
        let demodulator = AskDemodulator::new(config, params.threshold)?;
        Self::from_parts(config, params, demodulator)
    }
}

impl<F: LowPassFilter> AskLink<F> {
    /// Create a link with a caller-supplied envelope filter
    pub fn with_filter(config: SystemConfig, params: LinkParams, filter: F) -> Result<Self> {
        let demodulator = AskDemodulator::with_filter(config, params.threshold, filter)?;
        Self::from_parts(config, params, demodulator)
    }

    fn from_parts(
        config: SystemConfig,
        params: LinkParams,
        demodulator: AskDemodulator<F>,
    ) -> Result<Self> {
        if let Some(snr) = params.snr_db {
            if snr.is_nan() || snr == f64::NEG_INFINITY {
                return Err(ModemError::InvalidParameters {
                    msg: format!("Invalid SNR: {} dB", snr),
                });
            }
        }

        let modulator = AskModulator::new(config, params.amplitude)?;

        Ok(Self {
            config,
            params,
            modulator,
            demodulator,
        })
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn demodulator(&self) -> &AskDemodulator<F> {
        &self.demodulator
    }

    /// Send a given bit sequence through the link
    pub fn transmit(&self, bits: BitSequence, channel: &mut AwgnChannel) -> Result<LinkOutcome> {
        let waveform = self.modulator.modulate(&bits)?;

        let noisy = match self.params.snr_db {
            Some(snr_db) => channel.add_noise(waveform.samples(), snr_db)?,
            None => waveform.samples().to_vec(),
        };

        let recovered = self.demodulator.demodulate(&noisy, bits.len())?;
        let mut counter = BerCounter::new();
        let bit_errors = counter.record(&bits, &recovered)?;
        let ber = counter.ber()?;

        debug!(bits = bits.len(), bit_errors, ber, "link pass complete");

        Ok(LinkOutcome {
            bits,
            waveform,
            noisy,
            recovered,
            bit_errors,
            ber,
        })
    }

    /// Draw `bit_count` bits from `source` and send them
    pub fn run(
        &self,
        bit_count: usize,
        source: &mut BitSource,
        channel: &mut AwgnChannel,
    ) -> Result<LinkOutcome> {
        let bits = source.generate(bit_count);
        self.transmit(bits, channel)
    }

    /// Reproducible run: bit and noise streams are both derived from `seed`
    /// but never share state.
    pub fn run_seeded(&self, bit_count: usize, seed: u64) -> Result<LinkOutcome> {
        let mut master = StdRng::seed_from_u64(seed);
        let mut source = BitSource::from_seed(master.gen());
        let mut channel = AwgnChannel::from_seed(master.gen());
        let outcome = self.run(bit_count, &mut source, &mut channel)?;
        info!(seed, bit_count, ber = outcome.ber, "seeded link run");
        Ok(outcome)
    }
}
