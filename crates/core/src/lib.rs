//! asklink core - DSP primitives for the ASK link simulator
//!
//! This crate provides the sampled waveform container, a small complex
//! number type for filter design, and the causal low-pass filters used
//! by the envelope demodulator.

pub mod buffer;
pub mod complex;
pub mod filter;
pub mod error;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        buffer::Waveform,
        complex::Complex,
        filter::{Filter, FirFilter, IirFilter, LowPassFilter},
        error::{CoreError, Result},
    };
}
