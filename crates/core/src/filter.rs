//! Digital filter implementations

use crate::complex::{poly, Complex};
use crate::{CoreError, Result};
use std::f64::consts::PI;
use tracing::debug;

/// Generic filter trait
pub trait Filter<T: Copy> {
    /// Process a single sample
    fn process_sample(&mut self, input: T) -> T;

    /// Process a buffer of samples
    fn process_buffer(&mut self, input: &[T], output: &mut [T]) -> Result<()> {
        if input.len() != output.len() {
            return Err(CoreError::BufferSizeMismatch {
                expected: input.len(),
                actual: output.len(),
            });
        }

        for (i, sample) in input.iter().enumerate() {
            output[i] = self.process_sample(*sample);
        }

        Ok(())
    }

    /// Reset the filter state
    fn reset(&mut self);
}

/// Causal low-pass filtering of a whole block.
///
/// Every call starts from zero initial state, so one filter value can be
/// shared by independent demodulation runs.
pub trait LowPassFilter {
    /// Filter `input` with a single forward pass
    fn apply(&self, input: &[f64]) -> Vec<f64>;

    /// Nominal cutoff frequency in Hz
    fn cutoff_hz(&self) -> f64;
}

fn check_cutoff(cutoff_freq: f64, sample_rate: f64) -> Result<()> {
    if sample_rate <= 0.0 || !sample_rate.is_finite() {
        return Err(CoreError::InvalidSampleRate { rate: sample_rate });
    }

    if !(cutoff_freq > 0.0 && cutoff_freq < sample_rate / 2.0) {
        return Err(CoreError::InvalidFilterParameters {
            msg: format!(
                "Cutoff frequency {} Hz must lie strictly between 0 and Nyquist ({} Hz)",
                cutoff_freq,
                sample_rate / 2.0
            ),
        });
    }

    Ok(())
}

/// Finite Impulse Response (FIR) filter
#[derive(Debug, Clone)]
pub struct FirFilter {
    coefficients: Vec<f64>,
    delay_line: Vec<f64>,
    index: usize,
    cutoff_hz: f64,
}

impl FirFilter {
    /// Create a new FIR filter with given coefficients
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(CoreError::InvalidFilterParameters {
                msg: "FIR filter must have at least one coefficient".to_string(),
            });
        }

        let delay_line = vec![0.0; coefficients.len()];

        Ok(Self {
            coefficients,
            delay_line,
            index: 0,
            cutoff_hz: f64::NAN,
        })
    }

    /// Create a Hamming-windowed sinc low-pass FIR filter
    pub fn lowpass(cutoff_freq: f64, sample_rate: f64, num_taps: usize) -> Result<Self> {
        check_cutoff(cutoff_freq, sample_rate)?;

        if num_taps < 2 {
            return Err(CoreError::InvalidFilterParameters {
                msg: "Number of taps must be at least 2".to_string(),
            });
        }

        let mut coefficients = Vec::with_capacity(num_taps);
        let normalized_cutoff = 2.0 * cutoff_freq / sample_rate;
        let center = (num_taps - 1) as f64 / 2.0;

        for i in 0..num_taps {
            let n = i as f64 - center;
            let coeff = if n == 0.0 {
                normalized_cutoff
            } else {
                (PI * normalized_cutoff * n).sin() / (PI * n)
            };

            let window = 0.54 - 0.46 * (2.0 * PI * i as f64 / (num_taps - 1) as f64).cos();
            coefficients.push(coeff * window);
        }

        // Unity gain at DC
        let sum: f64 = coefficients.iter().sum();
        for c in &mut coefficients {
            *c /= sum;
        }

        let mut filter = Self::new(coefficients)?;
        filter.cutoff_hz = cutoff_freq;
        Ok(filter)
    }

    /// Filter taps
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Filter<f64> for FirFilter {
    fn process_sample(&mut self, input: f64) -> f64 {
        self.delay_line[self.index] = input;

        let mut output = 0.0;
        for (i, &coeff) in self.coefficients.iter().enumerate() {
            let delay_index = (self.index + self.delay_line.len() - i) % self.delay_line.len();
            output += coeff * self.delay_line[delay_index];
        }

        self.index = (self.index + 1) % self.delay_line.len();

        output
    }

    fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.index = 0;
    }
}

impl LowPassFilter for FirFilter {
    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut filter = self.clone();
        filter.reset();
        input.iter().map(|&x| filter.process_sample(x)).collect()
    }

    fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }
}

/// Infinite Impulse Response (IIR) filter in transfer-function form.
///
/// Runs as Direct Form II transposed, so a block filtered from zero state
/// matches the classical `lfilter(b, a, x)` output.
#[derive(Debug, Clone)]
pub struct IirFilter {
    b_coeffs: Vec<f64>, // Feedforward, normalized by a[0]
    a_coeffs: Vec<f64>, // Feedback, a[0] == 1
    state: Vec<f64>,
    cutoff_hz: f64,
}

impl IirFilter {
    /// Create a new IIR filter with given coefficients
    pub fn new(b_coeffs: Vec<f64>, a_coeffs: Vec<f64>) -> Result<Self> {
        if b_coeffs.is_empty() || a_coeffs.is_empty() {
            return Err(CoreError::InvalidFilterParameters {
                msg: "IIR filter must have at least one coefficient in each array".to_string(),
            });
        }

        if a_coeffs[0] == 0.0 {
            return Err(CoreError::InvalidFilterParameters {
                msg: "First feedback coefficient (a[0]) cannot be zero".to_string(),
            });
        }

        let n = b_coeffs.len().max(a_coeffs.len());
        let a0 = a_coeffs[0];
        let mut b: Vec<f64> = b_coeffs.iter().map(|c| c / a0).collect();
        let mut a: Vec<f64> = a_coeffs.iter().map(|c| c / a0).collect();
        b.resize(n, 0.0);
        a.resize(n, 0.0);

        Ok(Self {
            b_coeffs: b,
            a_coeffs: a,
            state: vec![0.0; n - 1],
            cutoff_hz: f64::NAN,
        })
    }

    /// Design a digital Butterworth low-pass filter.
    ///
    /// The analog prototype poles are scaled to the pre-warped cutoff and
    /// mapped through the bilinear transform; all N zeros land at z = -1.
    pub fn butterworth_lowpass(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        if order == 0 || order > 20 {
            return Err(CoreError::InvalidFilterParameters {
                msg: format!("Butterworth order must be 1-20, got {}", order),
            });
        }
        check_cutoff(cutoff_hz, sample_rate)?;

        let fs2 = 2.0 * sample_rate;
        let warped = fs2 * (PI * cutoff_hz / sample_rate).tan();

        let analog_poles: Vec<Complex> = (0..order)
            .map(|k| {
                let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
                Complex::from_polar(warped, theta)
            })
            .collect();

        let fs2_c = Complex::from(fs2);
        let mut denom = Complex::from(1.0);
        let digital_poles: Vec<Complex> = analog_poles
            .iter()
            .map(|&p| {
                denom = denom * (fs2_c - p);
                (fs2_c + p) / (fs2_c - p)
            })
            .collect();

        let gain = warped.powi(order as i32) / denom.real;

        let b: Vec<f64> = binomial_row(order).into_iter().map(|c| c * gain).collect();
        let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.real).collect();

        debug!(
            order,
            cutoff_hz,
            sample_rate,
            normalized_cutoff = cutoff_hz / (sample_rate / 2.0),
            "designed Butterworth low-pass"
        );

        let mut filter = Self::new(b, a)?;
        filter.cutoff_hz = cutoff_hz;
        Ok(filter)
    }

    /// Feedforward and feedback coefficients
    pub fn coefficients(&self) -> (&[f64], &[f64]) {
        (&self.b_coeffs, &self.a_coeffs)
    }

    /// Filter order
    pub fn order(&self) -> usize {
        self.state.len()
    }

    /// Complex frequency response at `freq_hz`
    pub fn frequency_response(&self, freq_hz: f64, sample_rate: f64) -> Complex {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .enumerate()
                .fold(Complex::default(), |acc, (k, &c)| {
                    acc + Complex::from_polar(c, -omega * k as f64)
                })
        };
        eval(&self.b_coeffs) / eval(&self.a_coeffs)
    }
}

/// Row `n` of Pascal's triangle
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for k in 0..n {
        let next = row[k] * (n - k) as f64 / (k + 1) as f64;
        row.push(next);
    }
    row
}

impl Filter<f64> for IirFilter {
    fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b_coeffs[0] * input + self.state.first().copied().unwrap_or(0.0);

        let n = self.state.len();
        for i in 1..=n {
            let carried = if i < n { self.state[i] } else { 0.0 };
            self.state[i - 1] = self.b_coeffs[i] * input - self.a_coeffs[i] * output + carried;
        }

        output
    }

    fn reset(&mut self) {
        self.state.fill(0.0);
    }
}

impl LowPassFilter for IirFilter {
    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut filter = self.clone();
        filter.reset();
        input.iter().map(|&x| filter.process_sample(x)).collect()
    }

    fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_fir_filter_creation() {
        let coeffs = vec![0.1, 0.2, 0.4, 0.2, 0.1];
        let filter = FirFilter::new(coeffs).unwrap();
        assert_eq!(filter.coefficients.len(), 5);
    }

    #[test]
    fn test_fir_lowpass_creation() {
        let filter = FirFilter::lowpass(1000.0, 48000.0, 51).unwrap();
        assert_eq!(filter.coefficients.len(), 51);
        let dc: f64 = filter.coefficients().iter().sum();
        assert!((dc - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fir_processing() {
        let mut filter = FirFilter::new(vec![0.5, 0.5]).unwrap();

        let output1 = filter.process_sample(1.0);
        let output2 = filter.process_sample(0.0);
        let output3 = filter.process_sample(0.0);

        assert_eq!(output1, 0.5);
        assert_eq!(output2, 0.5);
        assert_eq!(output3, 0.0);
    }

    #[test]
    fn test_iir_filter_creation() {
        let filter = IirFilter::new(vec![0.5], vec![1.0, -0.5]).unwrap();
        let (b, a) = filter.coefficients();
        assert_eq!(b, &[0.5, 0.0]);
        assert_eq!(a, &[1.0, -0.5]);
        assert_eq!(filter.order(), 1);
    }

    #[test]
    fn test_iir_rejects_zero_a0() {
        assert!(IirFilter::new(vec![1.0], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_iir_impulse_response() {
        // y[n] = 0.5 x[n] + 0.5 y[n-1]
        let mut filter = IirFilter::new(vec![0.5], vec![1.0, -0.5]).unwrap();
        let out: Vec<f64> = [1.0, 0.0, 0.0, 0.0]
            .iter()
            .map(|&x| filter.process_sample(x))
            .collect();
        assert_eq!(out, vec![0.5, 0.25, 0.125, 0.0625]);
    }

    #[test]
    fn test_butterworth_second_order_quarter_band() {
        // Known reference: order 2, cutoff at half of Nyquist
        let filter = IirFilter::butterworth_lowpass(2, 1000.0, 4000.0).unwrap();
        let (b, a) = filter.coefficients();
        let expected_b = [0.29289321881345254, 0.5857864376269051, 0.29289321881345254];
        let expected_a = [1.0, 0.0, 0.1715728752538099];
        for (got, want) in b.iter().zip(expected_b.iter()) {
            assert!((got - want).abs() < 1e-12, "b: {} vs {}", got, want);
        }
        for (got, want) in a.iter().zip(expected_a.iter()) {
            assert!((got - want).abs() < 1e-12, "a: {} vs {}", got, want);
        }
    }

    #[test]
    fn test_butterworth_fifth_order_response() {
        let filter = IirFilter::butterworth_lowpass(5, 5000.0, 44100.0).unwrap();
        assert_eq!(filter.order(), 5);

        let dc = filter.frequency_response(0.0, 44100.0).magnitude();
        assert!((dc - 1.0).abs() < 1e-9);

        let at_cutoff = filter.frequency_response(5000.0, 44100.0).magnitude();
        assert!((at_cutoff - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);

        let stop = filter.frequency_response(15000.0, 44100.0).magnitude();
        assert!(stop < 0.01);
    }

    #[test]
    fn test_butterworth_step_settles_to_unity() {
        let filter = IirFilter::butterworth_lowpass(5, 5000.0, 44100.0).unwrap();
        let out = filter.apply(&vec![1.0; 400]);
        assert!((out[399] - 1.0).abs() < 1e-6);
        // Causal: nothing before the input
        assert!(out[0] < 0.01);
    }

    #[test]
    fn test_butterworth_invalid_cutoff() {
        assert!(IirFilter::butterworth_lowpass(5, 30000.0, 44100.0).is_err());
        assert!(IirFilter::butterworth_lowpass(5, 0.0, 44100.0).is_err());
        assert!(IirFilter::butterworth_lowpass(0, 1000.0, 44100.0).is_err());
    }

    #[test]
    fn test_apply_is_stateless() {
        let filter = IirFilter::butterworth_lowpass(3, 2000.0, 16000.0).unwrap();
        let input: Vec<f64> = (0..64).map(|k| (k as f64 * 0.3).sin()).collect();
        assert_eq!(filter.apply(&input), filter.apply(&input));
    }

    #[test]
    fn test_process_buffer_size_mismatch() {
        let mut filter = FirFilter::new(vec![1.0]).unwrap();
        let mut output = vec![0.0; 3];
        assert!(filter.process_buffer(&[1.0, 2.0], &mut output).is_err());
    }

    #[quickcheck]
    fn prop_lowpass_preserves_length(input: Vec<f64>) -> bool {
        let iir = IirFilter::butterworth_lowpass(5, 5000.0, 44100.0).unwrap();
        let fir = FirFilter::lowpass(5000.0, 44100.0, 21).unwrap();
        iir.apply(&input).len() == input.len() && fir.apply(&input).len() == input.len()
    }

    #[quickcheck]
    fn prop_unit_tap_fir_is_identity(input: Vec<f64>) -> bool {
        let filter = FirFilter::new(vec![1.0]).unwrap();
        let output = filter.apply(&input);
        output.iter().zip(&input).all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
    }
}
