//! Bit error rate measurement

use crate::common::BitSequence;
use crate::{ModemError, Result};
use serde::{Deserialize, Serialize};

/// Number of positions where the two sequences differ
pub fn count_bit_errors(original: &BitSequence, recovered: &BitSequence) -> Result<usize> {
    if original.len() != recovered.len() {
        return Err(ModemError::PreconditionViolation {
            msg: format!(
                "bit count mismatch: transmitted {}, recovered {}",
                original.len(),
                recovered.len()
            ),
        });
    }

    Ok(original
        .iter()
        .zip(recovered.iter())
        .filter(|(a, b)| a != b)
        .count())
}

/// Fraction of differing bits, in `[0, 1]`. Two empty sequences give 0.
pub fn bit_error_rate(original: &BitSequence, recovered: &BitSequence) -> Result<f64> {
    let errors = count_bit_errors(original, recovered)?;
    if original.is_empty() {
        return Ok(0.0);
    }
    Ok(errors as f64 / original.len() as f64)
}

/// Running error tally over one or more demodulated sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BerCounter {
    bit_errors: usize,
    total_bits: usize,
    runs: usize,
}

impl BerCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a transmitted and a recovered sequence and add the result
    pub fn record(&mut self, original: &BitSequence, recovered: &BitSequence) -> Result<usize> {
        let errors = count_bit_errors(original, recovered)?;
        self.record_counts(errors, original.len());
        Ok(errors)
    }

    /// Add already counted errors
    pub fn record_counts(&mut self, bit_errors: usize, total_bits: usize) {
        self.bit_errors += bit_errors;
        self.total_bits += total_bits;
        self.runs += 1;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &BerCounter) {
        self.bit_errors += other.bit_errors;
        self.total_bits += other.total_bits;
        self.runs += other.runs;
    }

    /// Aggregate BER. Fails until at least one demodulated sequence was recorded.
    pub fn ber(&self) -> Result<f64> {
        if self.runs == 0 {
            return Err(ModemError::PreconditionViolation {
                msg: "BER requested before any bits were demodulated".to_string(),
            });
        }
        if self.total_bits == 0 {
            return Ok(0.0);
        }
        Ok(self.bit_errors as f64 / self.total_bits as f64)
    }

    pub fn bit_errors(&self) -> usize {
        self.bit_errors
    }

    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    pub fn runs(&self) -> usize {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn bits(v: &[u8]) -> BitSequence {
        BitSequence::new(v.to_vec()).unwrap()
    }

    #[test]
    fn test_ber_counts_differences() {
        let a = bits(&[1, 0, 1, 1, 0, 0, 1, 0, 1, 0]);
        let b = bits(&[1, 1, 1, 1, 0, 0, 0, 0, 1, 0]);
        assert_eq!(count_bit_errors(&a, &b).unwrap(), 2);
        assert_eq!(bit_error_rate(&a, &b).unwrap(), 0.2);
    }

    #[test]
    fn test_length_mismatch() {
        let err = bit_error_rate(&bits(&[1, 0]), &bits(&[1])).unwrap_err();
        assert!(matches!(err, ModemError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_empty_sequences() {
        let empty = BitSequence::default();
        assert_eq!(bit_error_rate(&empty, &empty).unwrap(), 0.0);
    }

    #[test]
    fn test_counter_before_demodulation_fails() {
        let counter = BerCounter::new();
        let err = counter.ber().unwrap_err();
        assert!(matches!(err, ModemError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_counter_accumulates() {
        let mut counter = BerCounter::new();
        counter.record(&bits(&[1, 0, 1, 0]), &bits(&[1, 0, 0, 0])).unwrap();
        counter.record(&bits(&[1, 1, 1, 1]), &bits(&[0, 0, 1, 1])).unwrap();
        assert_eq!(counter.runs(), 2);
        assert_eq!(counter.bit_errors(), 3);
        assert_eq!(counter.total_bits(), 8);
        assert_eq!(counter.ber().unwrap(), 0.375);

        let mut other = BerCounter::new();
        other.record_counts(1, 8);
        counter.merge(&other);
        assert_eq!(counter.ber().unwrap(), 0.25);
    }

    #[quickcheck]
    fn prop_ber_of_identical_is_zero(raw: Vec<bool>) -> bool {
        let b: BitSequence = raw.into_iter().collect();
        bit_error_rate(&b, &b).unwrap() == 0.0
    }

    #[quickcheck]
    fn prop_ber_in_unit_interval(pairs: Vec<(bool, bool)>) -> bool {
        let a: BitSequence = pairs.iter().map(|p| p.0).collect();
        let b: BitSequence = pairs.iter().map(|p| p.1).collect();
        let ber = bit_error_rate(&a, &b).unwrap();
        (0.0..=1.0).contains(&ber)
    }

    #[quickcheck]
    fn prop_complement_is_all_errors(raw: Vec<bool>) -> bool {
        if raw.is_empty() {
            return true;
        }
        let a: BitSequence = raw.iter().copied().collect();
        let b: BitSequence = raw.iter().map(|x| !x).collect();
        bit_error_rate(&a, &b).unwrap() == 1.0
    }
}
