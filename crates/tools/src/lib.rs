//! asklink tools - command-line driver for the ASK link simulator

pub mod cli;
pub mod common;
pub mod config;
pub mod simulate;
pub mod sweep;
pub mod trace;

pub use cli::{Cli, Commands};
pub use common::{init_logging, GlobalConfig};
pub use config::SimulationConfig;
pub use simulate::{format_report, simulate, RunArgs};
pub use sweep::{run_sweep, SweepArgs, SweepReport};
pub use trace::WaveformTrace;
