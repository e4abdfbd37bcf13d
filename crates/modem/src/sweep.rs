//! BER versus SNR sweeps
//!
//! Every trial gets its own seed drawn up front from a master generator,
//! so bit and noise streams are never shared between runs and the result
//! does not depend on whether trials execute sequentially or in parallel.

use crate::ber::BerCounter;
use crate::common::SystemConfig;
use crate::link::{AskLink, LinkParams};
use crate::{ModemError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evenly spaced SNR values from `start` to `stop` inclusive
pub fn snr_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !start.is_finite() || !stop.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(ModemError::InvalidParameters {
            msg: format!("Invalid SNR range {}..={} step {}", start, stop, step),
        });
    }
    if stop < start {
        return Ok(Vec::new());
    }

    // Tolerate accumulated rounding at the upper end
    let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// One row of a sweep result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub snr_db: f64,
    pub ber: f64,
    pub bit_errors: usize,
    pub total_bits: usize,
}

/// Sweep description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnrSweep {
    /// SNR values in dB
    pub snr_db: Vec<f64>,
    /// Independent link runs per SNR value
    pub trials: usize,
    /// Bits per run
    pub bit_count: usize,
    /// Master seed
    pub seed: u64,
}

impl SnrSweep {
    /// Run the sweep with the default Butterworth envelope filter
    pub fn run(
        &self,
        config: SystemConfig,
        amplitude: f64,
        threshold: f64,
    ) -> Result<Vec<SweepPoint>> {
        if self.trials == 0 || self.bit_count == 0 {
            return Err(ModemError::InvalidParameters {
                msg: "Sweep needs at least one trial and one bit per trial".to_string(),
            });
        }

        let mut master = StdRng::seed_from_u64(self.seed);
        let seeds: Vec<u64> = (0..self.snr_db.len() * self.trials)
            .map(|_| master.gen())
            .collect();

        let mut points = Vec::with_capacity(self.snr_db.len());
        for (snr_db, trial_seeds) in self.snr_db.iter().zip(seeds.chunks(self.trials)) {
            let params = LinkParams {
                amplitude,
                snr_db: Some(*snr_db),
                threshold,
            };
            let link = AskLink::new(config, params)?;

            let counter = self.run_trials(&link, trial_seeds)?;
            let point = SweepPoint {
                snr_db: *snr_db,
                ber: counter.ber()?,
                bit_errors: counter.bit_errors(),
                total_bits: counter.total_bits(),
            };

            info!(
                snr_db = point.snr_db,
                ber = point.ber,
                bit_errors = point.bit_errors,
                total_bits = point.total_bits,
                "sweep point"
            );
            points.push(point);
        }

        Ok(points)
    }

    #[cfg(feature = "parallel")]
    fn run_trials(&self, link: &AskLink, seeds: &[u64]) -> Result<BerCounter> {
        let counts = seeds
            .par_iter()
            .map(|&seed| {
                link.run_seeded(self.bit_count, seed)
                    .map(|o| (o.bit_errors, o.bits.len()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(tally(&counts))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_trials(&self, link: &AskLink, seeds: &[u64]) -> Result<BerCounter> {
        let counts = seeds
            .iter()
            .map(|&seed| {
                link.run_seeded(self.bit_count, seed)
                    .map(|o| (o.bit_errors, o.bits.len()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(tally(&counts))
    }
}

fn tally(counts: &[(usize, usize)]) -> BerCounter {
    let mut counter = BerCounter::new();
    for &(errors, bits) in counts {
        counter.record_counts(errors, bits);
    }
    counter
}
