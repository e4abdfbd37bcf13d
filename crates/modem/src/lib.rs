//! asklink modem - on-off keyed ASK link stages
//!
//! Bit source, ASK modulator, AWGN channel, envelope demodulator and
//! bit-error-rate measurement, plus an end-to-end link runner and an
//! SNR sweep built on top of them.

pub mod ask;
pub mod ber;
pub mod channel;
pub mod common;
pub mod error;
pub mod link;
pub mod source;
pub mod sweep;

pub use error::{ModemError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ask::{AskDemodulator, AskModulator},
        ber::{bit_error_rate, count_bit_errors, BerCounter},
        channel::AwgnChannel,
        common::{BitSequence, Demodulator, Modulator, SystemConfig, SystemParams},
        link::{AskLink, LinkOutcome, LinkParams},
        source::BitSource,
        sweep::{snr_range, SnrSweep, SweepPoint},
        error::{ModemError, Result},
    };
}
