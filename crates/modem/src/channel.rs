//! Additive white Gaussian noise channel

use crate::{ModemError, Result};
use asklink_core::buffer::mean_power;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Noise power giving `snr_db` against a signal of average power `signal_power`.
///
/// Zero signal power gives zero noise power whatever the SNR.
pub fn noise_power_for(signal_power: f64, snr_db: f64) -> f64 {
    if signal_power == 0.0 {
        return 0.0;
    }
    signal_power / 10f64.powf(snr_db / 10.0)
}

/// AWGN channel with its own random stream
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    rng: StdRng,
}

impl AwgnChannel {
    /// Reproducible channel
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Channel seeded from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Add white Gaussian noise at `snr_db` relative to the mean power of the
    /// whole signal, silent stretches included.
    pub fn add_noise(&mut self, signal: &[f64], snr_db: f64) -> Result<Vec<f64>> {
        if snr_db.is_nan() || snr_db == f64::NEG_INFINITY {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid SNR: {} dB", snr_db),
            });
        }

        let signal_power = mean_power(signal);
        let noise_power = noise_power_for(signal_power, snr_db);

        debug!(signal_power, noise_power, snr_db, samples = signal.len(), "adding noise");

        if noise_power == 0.0 {
            return Ok(signal.to_vec());
        }

        let normal = Normal::new(0.0, noise_power.sqrt()).map_err(|e| {
            ModemError::InvalidParameters {
                msg: format!("Cannot build noise distribution: {}", e),
            }
        })?;

        Ok(signal
            .iter()
            .map(|&s| s + normal.sample(&mut self.rng))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(n: usize) -> Vec<f64> {
        (0..n).map(|k| (k as f64 * 0.7).sin()).collect()
    }

    #[test]
    fn test_noise_power_for() {
        assert!((noise_power_for(1.0, 10.0) - 0.1).abs() < 1e-15);
        assert!((noise_power_for(0.5, 0.0) - 0.5).abs() < 1e-15);
        assert_eq!(noise_power_for(0.0, 10.0), 0.0);
        assert_eq!(noise_power_for(2.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_same_length() {
        let mut channel = AwgnChannel::from_seed(1);
        let signal = tone(500);
        assert_eq!(channel.add_noise(&signal, 5.0).unwrap().len(), 500);
    }

    #[test]
    fn test_all_zero_signal_stays_zero() {
        let mut channel = AwgnChannel::from_seed(2);
        for snr in [-20.0, 0.0, 5.0, 100.0] {
            let noisy = channel.add_noise(&[0.0; 128], snr).unwrap();
            assert!(noisy.iter().all(|&s| s == 0.0));
        }
        assert!(channel.add_noise(&[], 5.0).unwrap().is_empty());
    }

    #[test]
    fn test_high_snr_is_close() {
        let mut channel = AwgnChannel::from_seed(3);
        let signal = tone(2000);
        let sigma = noise_power_for(mean_power(&signal), 100.0).sqrt();
        let noisy = channel.add_noise(&signal, 100.0).unwrap();

        let max_dev = signal
            .iter()
            .zip(&noisy)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(max_dev < 8.0 * sigma, "max deviation {} vs sigma {}", max_dev, sigma);
    }

    #[test]
    fn test_measured_noise_power_matches_target() {
        let mut channel = AwgnChannel::from_seed(4);
        let signal = tone(50_000);
        let target = noise_power_for(mean_power(&signal), 3.0);
        let noisy = channel.add_noise(&signal, 3.0).unwrap();

        let noise: Vec<f64> = noisy.iter().zip(&signal).map(|(n, s)| n - s).collect();
        let measured = mean_power(&noise);
        assert!((measured / target - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_power_includes_silent_samples() {
        // Half the samples silent: mean power is half the tone power
        let mut signal = tone(20_000);
        signal[10_000..].fill(0.0);
        let expected = mean_power(&signal[..10_000]) / 2.0;
        assert!((mean_power(&signal) - expected).abs() < 1e-12);

        let mut channel = AwgnChannel::from_seed(5);
        let noisy = channel.add_noise(&signal, 0.0).unwrap();
        let noise_tail = mean_power(&noisy[10_000..]);
        assert!((noise_tail / expected - 1.0).abs() < 0.06);
    }

    #[test]
    fn test_seed_reproducibility() {
        let signal = tone(64);
        let a = AwgnChannel::from_seed(9).add_noise(&signal, 5.0).unwrap();
        let b = AwgnChannel::from_seed(9).add_noise(&signal, 5.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_infinite_snr_is_noiseless() {
        let signal = tone(64);
        let mut channel = AwgnChannel::from_seed(6);
        assert_eq!(channel.add_noise(&signal, f64::INFINITY).unwrap(), signal);
    }

    #[test]
    fn test_invalid_snr() {
        let mut channel = AwgnChannel::from_entropy();
        assert!(channel.add_noise(&tone(8), f64::NAN).is_err());
        assert!(channel.add_noise(&tone(8), f64::NEG_INFINITY).is_err());
    }
}
