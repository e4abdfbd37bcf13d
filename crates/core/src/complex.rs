//! Minimal complex arithmetic for pole/zero manipulation

use std::ops::{Add, Div, Mul, Sub};

/// Complex number
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }
    
    /// Complex number with the given magnitude at angle `theta`
    pub fn from_polar(magnitude: f64, theta: f64) -> Self {
        Self::new(magnitude * theta.cos(), magnitude * theta.sin())
    }
    
    pub fn magnitude(&self) -> f64 {
        (self.real * self.real + self.imag * self.imag).sqrt()
    }
    
    pub fn norm_sqr(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }
    
    pub fn phase(&self) -> f64 {
        self.imag.atan2(self.real)
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Complex::new(real, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;
    
    fn add(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl Sub for Complex {
    type Output = Complex;
    
    fn sub(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul for Complex {
    type Output = Complex;
    
    fn mul(self, rhs: Complex) -> Self::Output {
        Complex::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    
    fn mul(self, rhs: f64) -> Self::Output {
        Complex::new(self.real * rhs, self.imag * rhs)
    }
}

impl Div for Complex {
    type Output = Complex;
    
    fn div(self, rhs: Complex) -> Self::Output {
        let denom = rhs.norm_sqr();
        Complex::new(
            (self.real * rhs.real + self.imag * rhs.imag) / denom,
            (self.imag * rhs.real - self.real * rhs.imag) / denom,
        )
    }
}

/// Expand the monic polynomial whose roots are `roots`.
///
/// Coefficients are returned highest power first: `[1, c1, c2, ...]`.
pub fn poly(roots: &[Complex]) -> Vec<Complex> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex::default(); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] = next[i] + c;
            next[i + 1] = next[i + 1] - c * root;
        }
        coeffs = next;
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let c = Complex::new(3.0, 4.0);
        assert_eq!(c.magnitude(), 5.0);
        assert!((c.phase() - 0.9272952180016122).abs() < 1e-10);
        
        let q = c / Complex::new(3.0, 4.0);
        assert!((q.real - 1.0).abs() < 1e-12);
        assert!(q.imag.abs() < 1e-12);
    }

    #[test]
    fn test_from_polar_keeps_magnitude() {
        let c = Complex::from_polar(2.5, std::f64::consts::FRAC_PI_2);
        assert!((c.magnitude() - 2.5).abs() < 1e-12);
        assert!(c.real.abs() < 1e-12);
        assert!((c.imag - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_poly_expansion() {
        // (z - 1)(z + 2) = z^2 + z - 2
        let coeffs = poly(&[Complex::from(1.0), Complex::from(-2.0)]);
        let real: Vec<f64> = coeffs.iter().map(|c| c.real).collect();
        assert_eq!(real, vec![1.0, 1.0, -2.0]);
    }

    #[test]
    fn test_poly_conjugate_pair_is_real() {
        let p = Complex::new(0.5, 0.25);
        let coeffs = poly(&[p, Complex::new(p.real, -p.imag)]);
        assert!(coeffs.iter().all(|c| c.imag.abs() < 1e-15));
        assert!((coeffs[1].real + 1.0).abs() < 1e-15);
        assert!((coeffs[2].real - 0.3125).abs() < 1e-15);
    }
}
